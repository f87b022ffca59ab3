#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use quiz_forge::{
    build_router,
    config::{Config, LogFormat},
    database::{pool::create_pool, run_migrations},
    AppState,
};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Router over a fresh in-memory database plus a tiny cookie store, so a
/// test reads like one browser session.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub pool: SqlitePool,
    cookies: HashMap<String, String>,
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        database_max_connections: 1,
        session_secret: "integration-test-secret".into(),
        session_ttl_hours: 1,
        log_format: LogFormat::Text,
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let config = test_config();
        let pool = create_pool(&config).await.expect("pool");
        run_migrations(&pool).await.expect("migrations");
        let state = AppState::new(pool.clone(), config);
        Self {
            router: build_router(state.clone()),
            state,
            pool,
            cookies: HashMap::new(),
        }
    }

    /// Same database, empty cookie store.
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            state: self.state.clone(),
            pool: self.pool.clone(),
            cookies: HashMap::new(),
        }
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let req = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let req = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
            .unwrap();
        self.send(req).await
    }

    pub async fn register(&mut self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/register", &[("username", username), ("password", password)])
            .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    pub async fn signed_in(username: &str) -> Self {
        let mut app = Self::spawn().await;
        app.register(username, "pw").await;
        let resp = app.login(username, "pw").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        app
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if !self.cookies.is_empty() {
            let header_value = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, header_value);
        }
        builder
    }

    async fn send(&mut self, req: Request<Body>) -> Response<Body> {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        for value in resp.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or_default();
            let (name, val) = pair.split_once('=').unwrap_or((pair, ""));
            if val.is_empty() {
                self.cookies.remove(name.trim());
            } else {
                self.cookies.insert(name.trim().to_string(), val.to_string());
            }
        }
        resp
    }
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()[header::LOCATION].to_str().unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
