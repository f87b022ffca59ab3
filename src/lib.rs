pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::repositories::{SqliteQuizRepository, SqliteUserRepository};
use crate::services::{auth_service::AuthService, quiz_service::QuizService};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub quiz_service: QuizService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        let auth_service = AuthService::new(Arc::new(SqliteUserRepository::new(pool.clone())));
        let quiz_service = QuizService::new(Arc::new(SqliteQuizRepository::new(pool.clone())));

        Self {
            pool,
            config: Arc::new(config),
            auth_service,
            quiz_service,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::home))
        .route("/health", get(routes::health::health))
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route("/logout", get(routes::auth::logout))
        .route(
            "/create",
            get(routes::quiz::create_page).post(routes::quiz::create_quiz),
        )
        .route(
            "/quiz/:id",
            get(routes::quiz::take_quiz).post(routes::quiz::submit_quiz),
        )
        .route("/quiz/:id/delete", post(routes::quiz::delete_quiz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
