//! HTTP transport implementation.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::{Error, InvalidInputError, TransportError};

/// A single HTTP request, fully resolved.
#[derive(Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            body: None,
        }
    }

    /// Attach an already-built JSON body.
    pub fn with_body(mut self, body: Option<serde_json::Value>) -> Self {
        self.body = body;
        self
    }

    /// Serialize `body` into the JSON body.
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Payload {
            reason: e.to_string(),
        })?;
        Ok(self.with_body(Some(value)))
    }
}

// Bodies can carry passwords and refresh tokens
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// The status and raw body of a response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends requests to the API.
///
/// Implementations report every response, whatever its status, as `Ok`;
/// only failures to obtain a response are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    log_bodies: bool,
}

impl ReqwestTransport {
    /// Create a transport configured from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::ClientBuild {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            log_bodies: config.log_bodies,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Response status code");

        let body = response.text().await?;
        if self.log_bodies {
            trace!(%body, "Response body");
        }

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_creation() {
        let config = ClientConfig::default().with_timeout(std::time::Duration::from_secs(3));
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[test]
    fn request_debug_hides_body() {
        let request = HttpRequest::new(
            Method::POST,
            "https://api.playtomic.io/v3/auth/login",
            HeaderMap::new(),
        )
        .with_json(&serde_json::json!({"email": "a@b.c", "password": "secret"}))
        .unwrap();

        let debug = format!("{:?}", request);
        assert!(debug.contains("/v3/auth/login"));
        assert!(!debug.contains("secret"));
    }
}
