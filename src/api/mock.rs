//! Scripted in-memory backend for store tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::client::ApiClient;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::{AppError, Result};
use crate::session::SessionStore;

struct Route {
    method: Method,
    path: String,
    response: Result<ApiResponse>,
}

/// Answers each request with the first queued response whose method and
/// path match; unmatched requests get a 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<VecDeque<Route>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, Ok(ApiResponse::new(status, body.to_string())))
    }

    pub fn fail(&self, method: Method, path: &str) -> &Self {
        self.push(
            method,
            path,
            Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        )
    }

    fn push(&self, method: Method, path: &str, response: Result<ApiResponse>) -> &Self {
        self.routes.lock().unwrap().push_back(Route {
            method,
            path: path.to_string(),
            response,
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let mut routes = self.routes.lock().unwrap();
        let position = routes
            .iter()
            .position(|r| r.method == request.method && r.path == request.path);
        match position.and_then(|i| routes.remove(i)) {
            Some(route) => route.response,
            None => Ok(ApiResponse::new(404, r#"{"message":"no route"}"#)),
        }
    }
}

/// A client over `transport` with an in-memory session.
pub fn client(transport: &Arc<MockTransport>) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(
        transport.clone(),
        Arc::new(SessionStore::in_memory()),
    ))
}
