use std::sync::Arc;

use validator::Validate;

use crate::dto::auth_dto::{LoginForm, RegisterForm};
use crate::error::{Error, Result};
use crate::models::NewUser;
use crate::repositories::UserRepository;
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::session::SessionUser;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<i64> {
        form.validate()?;

        // Early exit only; the unique constraint settles races.
        if self.users.find_by_username(&form.username).await?.is_some() {
            return Err(Error::DuplicateUsername(form.username.clone()));
        }

        let password_hash = hash_password(&form.password)?;
        let user = self
            .users
            .insert(NewUser {
                username: form.username.clone(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "Registered user");
        Ok(user.id)
    }

    pub async fn login(&self, form: &LoginForm) -> Result<SessionUser> {
        let Some(user) = self.users.find_by_username(&form.username).await? else {
            tracing::debug!(username = %form.username, "Login for unknown username");
            return Err(Error::InvalidCredentials);
        };

        if !verify_password(&form.password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Login with wrong password");
            return Err(Error::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in");
        Ok(SessionUser {
            id: user.id,
            username: user.username,
        })
    }

    /// Re-reads the session's account; `None` once the user no longer exists.
    pub async fn current_user(&self, session: &SessionUser) -> Result<Option<SessionUser>> {
        let user = self.users.find_by_id(session.id).await?;
        Ok(user.map(|u| SessionUser {
            id: u.id,
            username: u.username,
        }))
    }
}
