use askama::Template;
use axum::{extract::State, response::Response};
use axum_extra::extract::cookie::CookieJar;

use super::{page_context, render, PageContext};
use crate::middleware::Principal;
use crate::models::QuizSummary;
use crate::AppState;

#[derive(Template)]
#[template(path = "home.html")]
struct HomePage {
    page: PageContext,
    quizzes: Vec<QuizSummary>,
}

#[axum::debug_handler(state = AppState)]
pub async fn home(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
) -> crate::error::Result<Response> {
    let quizzes = state.quiz_service.list_quizzes().await?;
    let (jar, page) = page_context(&principal, jar);
    render(jar, HomePage { page, quizzes })
}
