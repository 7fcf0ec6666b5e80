//! `reqwest`-backed transport.

use async_trait::async_trait;
use url::Url;

use super::transport::{ApiRequest, ApiResponse, Body, Transport};
use crate::error::Result;
use crate::models::ApiConfig;
use crate::utils::{http, join_url};

/// Talks to the real backend over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        Self::with_client(client, &config.base_url)
    }

    /// Use an existing client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = join_url(&self.base_url, &request.path);
        let mut builder = self.client.request(request.method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}
