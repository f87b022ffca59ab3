use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::utils::session::{resolve_token, SessionUser, SESSION_COOKIE};
use crate::AppState;

/// Who is making the request. Resolving never fails; a missing, invalid or
/// stale session is simply `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User(SessionUser),
}

impl Principal {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Principal::User(user) => Some(user),
            Principal::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Principal::Anonymous)
    }

    pub fn username(&self) -> Option<String> {
        self.user().map(|u| u.username.clone())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Principal {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(session) = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| resolve_token(&state.config, cookie.value()))
        else {
            return Ok(Principal::Anonymous);
        };

        let principal = match state.auth_service.current_user(&session).await {
            Ok(Some(user)) => Principal::User(user),
            Ok(None) => {
                tracing::debug!(user_id = session.id, "Session for unknown user");
                Principal::Anonymous
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not resolve session user");
                Principal::Anonymous
            }
        };
        Ok(principal)
    }
}
