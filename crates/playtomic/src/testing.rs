//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Replays queued outcomes in order and records every request it sees.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    seen: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: StatusCode, body: serde_json::Value) -> Self {
        self.push(Ok(HttpResponse::new(status, body.to_string())))
    }

    pub(crate) fn respond_text(self, status: StatusCode, body: &str) -> Self {
        self.push(Ok(HttpResponse::new(status, body)))
    }

    pub(crate) fn fail(self, err: TransportError) -> Self {
        self.push(Err(err))
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }

    fn push(self, outcome: Result<HttpResponse, TransportError>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Request {
                    message: "no scripted response left".to_string(),
                })
            })
    }
}
