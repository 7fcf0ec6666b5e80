//! API client shared by all stores.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::transport::{ApiRequest, ApiResponse, Body, Method, Transport};
use crate::error::Result;
use crate::session::SessionStore;

/// Sends requests through a [`Transport`], attaching the session's bearer
/// token when one is present.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Send with the current session token; non-success statuses become errors.
    pub async fn send(&self, method: Method, path: &str, body: Body) -> Result<ApiResponse> {
        self.send_as(method, path, body, self.session.token()).await
    }

    /// Send with an explicit bearer token (or none).
    pub async fn send_as(
        &self,
        method: Method,
        path: &str,
        body: Body,
        bearer: Option<String>,
    ) -> Result<ApiResponse> {
        log::debug!("{} {}", method, path);
        let request = ApiRequest {
            method: method.clone(),
            path: path.to_string(),
            body,
            bearer,
        };
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            log::warn!("{} {} -> {}", method, path, response.status);
        }
        response.error_for_status()
    }

    /// GET and decode JSON.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, Body::Empty).await?.json()
    }

    /// Send and decode the JSON response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> Result<T> {
        self.send(method, path, body).await?.json()
    }

    /// Send and ignore the response body.
    pub async fn execute(&self, method: Method, path: &str, body: Body) -> Result<()> {
        self.send(method, path, body).await.map(|_| ())
    }
}
