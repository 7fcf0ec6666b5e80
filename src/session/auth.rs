//! Login against `/api/auth/login`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, Body, Method, endpoints};
use crate::error::{AppError, Result};
use crate::models::User;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    username: String,
    #[serde(default)]
    role: String,
    token: String,
}

/// Exchanges credentials for a bearer token and records the session.
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Log in; both fields are required before any request is sent.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::validation("username and password are required"));
        }

        let body = Body::json(&Credentials { username, password })?;
        let response: LoginResponse = self
            .client
            .send_as(Method::POST, endpoints::AUTH_LOGIN, body, None)
            .await
            .inspect_err(|e| log::error!("Login failed for {}: {}", username, e))?
            .json()?;

        let user = User {
            username: response.username,
            role: response.role,
        };
        self.client.session().login(user.clone(), response.token).await?;
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.client.session().logout().await
    }
}
