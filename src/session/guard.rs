//! Gate for admin views.

use std::sync::Arc;

use serde::Deserialize;

use crate::api::{ApiClient, Body, Method, endpoints};
use crate::error::{AppError, Result};
use crate::models::{ADMIN_ROLE, User};

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected view.
    Allow(User),
    /// Send the user to the login view.
    RedirectToLogin,
}

#[derive(Deserialize)]
struct Me {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    role: String,
}

/// Verifies the stored token against `/api/auth/me` before an admin view
/// renders. There is no refresh: an expired token fails here and the
/// session is dropped.
pub struct RouteGuard {
    client: Arc<ApiClient>,
}

impl RouteGuard {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> GuardDecision {
        let session = self.client.session();
        let Some(token) = session.token() else {
            return GuardDecision::RedirectToLogin;
        };

        let me = self
            .client
            .send_as(Method::GET, endpoints::AUTH_ME, Body::Empty, Some(token))
            .await
            .and_then(|resp| resp.json::<Me>());

        match me {
            Ok(me) if me.role == ADMIN_ROLE => {
                let username = me
                    .username
                    .or_else(|| session.user().map(|u| u.username))
                    .unwrap_or_default();
                GuardDecision::Allow(User {
                    username,
                    role: me.role,
                })
            }
            Ok(me) => {
                log::warn!("Role '{}' may not open admin views", me.role);
                GuardDecision::RedirectToLogin
            }
            Err(e) => {
                log::warn!("Session rejected: {}", e);
                if let Err(e) = session.logout().await {
                    log::error!("Failed to clear session: {}", e);
                }
                GuardDecision::RedirectToLogin
            }
        }
    }

    /// Like [`check`](Self::check), as a `Result` for command handlers.
    pub async fn require_admin(&self) -> Result<User> {
        match self.check().await {
            GuardDecision::Allow(user) => Ok(user),
            GuardDecision::RedirectToLogin => Err(AppError::Unauthorized(
                "admin login required".to_string(),
            )),
        }
    }
}
