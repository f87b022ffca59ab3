pub mod auth;
pub mod health;
pub mod home;
pub mod quiz;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::error::Result;
use crate::middleware::Principal;
use crate::utils::flash;

/// Data every page needs for the shared layout.
pub struct PageContext {
    pub username: Option<String>,
    pub flash: Option<String>,
}

/// Consumes the pending flash message while building the layout context.
pub fn page_context(principal: &Principal, jar: CookieJar) -> (CookieJar, PageContext) {
    let (jar, message) = flash::take(jar);
    (
        jar,
        PageContext {
            username: principal.username(),
            flash: message,
        },
    )
}

pub fn render<T: Template>(jar: CookieJar, template: T) -> Result<Response> {
    let body = template.render()?;
    Ok((jar, Html(body)).into_response())
}
