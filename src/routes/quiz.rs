use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, State},
    response::Response,
    Form,
};
use axum_extra::extract::{cookie::CookieJar, Form as RepeatedForm};

use super::{page_context, render, PageContext};
use crate::dto::quiz_dto::CreateQuizForm;
use crate::error::{Error, Result};
use crate::middleware::Principal;
use crate::models::{Question, Quiz};
use crate::utils::flash;
use crate::AppState;

const LOGIN_REQUIRED: &str = "Please log in to access this page.";

#[derive(Template)]
#[template(path = "create_quiz.html")]
struct CreateQuizPage {
    page: PageContext,
}

#[derive(Template)]
#[template(path = "take_quiz.html")]
struct TakeQuizPage {
    page: PageContext,
    quiz: Quiz,
    questions: Vec<Question>,
    is_owner: bool,
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsPage {
    page: PageContext,
    quiz: Quiz,
    score: usize,
    total: usize,
}

/// Ids that are not numbers, or do not fit an `i64`, name no quiz.
fn parse_quiz_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| Error::NotFound(format!("Quiz {} does not exist", raw)))
}

pub async fn create_page(principal: Principal, jar: CookieJar) -> Result<Response> {
    if principal.is_anonymous() {
        return Ok(flash::redirect_with(jar, "/login", LOGIN_REQUIRED));
    }
    let (jar, page) = page_context(&principal, jar);
    render(jar, CreateQuizPage { page })
}

#[axum::debug_handler(state = AppState)]
pub async fn create_quiz(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
    RepeatedForm(form): RepeatedForm<CreateQuizForm>,
) -> Result<Response> {
    match state.quiz_service.create_quiz(&principal, form).await {
        Ok(_) => Ok(flash::redirect_with(jar, "/", "Quiz created successfully!")),
        Err(Error::Unauthenticated) => Ok(flash::redirect_with(jar, "/login", LOGIN_REQUIRED)),
        Err(e) if e.is_user_facing() => {
            tracing::info!(error = %e, "Quiz submission rejected");
            Ok(flash::redirect_with(jar, "/create", &e.to_string()))
        }
        Err(e) => Err(e),
    }
}

#[axum::debug_handler(state = AppState)]
pub async fn take_quiz(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let quiz_id = parse_quiz_id(&raw_id)?;
    let detail = state.quiz_service.get_quiz_for_display(quiz_id).await?;
    let is_owner = principal
        .user()
        .is_some_and(|u| u.id == detail.quiz.created_by);
    let (jar, page) = page_context(&principal, jar);
    render(
        jar,
        TakeQuizPage {
            page,
            quiz: detail.quiz,
            questions: detail.questions,
            is_owner,
        },
    )
}

#[axum::debug_handler(state = AppState)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
    Path(raw_id): Path<String>,
    Form(answers): Form<HashMap<String, String>>,
) -> Result<Response> {
    let quiz_id = parse_quiz_id(&raw_id)?;
    let result = state.quiz_service.submit_answers(quiz_id, &answers).await?;
    let (jar, page) = page_context(&principal, jar);
    render(
        jar,
        ResultsPage {
            page,
            quiz: result.quiz,
            score: result.score,
            total: result.total,
        },
    )
}

#[axum::debug_handler(state = AppState)]
pub async fn delete_quiz(
    State(state): State<AppState>,
    principal: Principal,
    jar: CookieJar,
    Path(raw_id): Path<String>,
) -> Result<Response> {
    let quiz_id = parse_quiz_id(&raw_id)?;
    match state.quiz_service.delete_quiz(&principal, quiz_id).await {
        Ok(()) => Ok(flash::redirect_with(jar, "/", "Quiz deleted.")),
        Err(Error::Unauthenticated) => Ok(flash::redirect_with(jar, "/login", LOGIN_REQUIRED)),
        Err(Error::Forbidden(msg)) => Ok(flash::redirect_with(
            jar,
            &format!("/quiz/{}", quiz_id),
            &msg,
        )),
        Err(e) => Err(e),
    }
}
