use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::{page_context, render, PageContext};
use crate::dto::auth_dto::{LoginForm, RegisterForm};
use crate::error::Result;
use crate::middleware::Principal;
use crate::utils::flash;
use crate::utils::session::{issue_token, removal_cookie, session_cookie};
use crate::AppState;

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterPage {
    page: PageContext,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginPage {
    page: PageContext,
}

pub async fn register_page(principal: Principal, jar: CookieJar) -> Result<Response> {
    let (jar, page) = page_context(&principal, jar);
    render(jar, RegisterPage { page })
}

#[axum::debug_handler(state = AppState)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    match state.auth_service.register(&form).await {
        Ok(_) => Ok(flash::redirect_with(
            jar,
            "/login",
            "Registered successfully! Please log in.",
        )),
        Err(e) if e.is_user_facing() => {
            tracing::info!(username = %form.username, error = %e, "Registration rejected");
            Ok(flash::redirect_with(jar, "/register", &e.to_string()))
        }
        Err(e) => Err(e),
    }
}

pub async fn login_page(principal: Principal, jar: CookieJar) -> Result<Response> {
    let (jar, page) = page_context(&principal, jar);
    render(jar, LoginPage { page })
}

#[axum::debug_handler(state = AppState)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match state.auth_service.login(&form).await {
        Ok(user) => {
            let token = issue_token(&state.config, &user)?;
            Ok((jar.add(session_cookie(token)), Redirect::to("/")).into_response())
        }
        Err(e) if e.is_user_facing() => Ok(flash::redirect_with(jar, "/login", &e.to_string())),
        Err(e) => Err(e),
    }
}

/// Always succeeds, with or without a live session.
pub async fn logout(principal: Principal, jar: CookieJar) -> Response {
    if let Some(user) = principal.user() {
        tracing::info!(user_id = user.id, "User logged out");
    }
    (jar.remove(removal_cookie()), Redirect::to("/")).into_response()
}
