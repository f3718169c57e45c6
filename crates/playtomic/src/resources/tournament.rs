//! Tournament endpoints.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::Result;
use crate::dispatch::RequestDispatcher;
use crate::http;
use crate::types::ResourceId;

use super::to_payload;

/// Tournament operations, obtained from [`PlaytomicClient::tournaments`](crate::PlaytomicClient::tournaments).
#[derive(Debug, Clone, Copy)]
pub struct Tournaments<'a> {
    dispatcher: &'a RequestDispatcher,
}

impl<'a> Tournaments<'a> {
    pub(crate) fn new(dispatcher: &'a RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fetch a tournament by id.
    #[instrument(skip_all, fields(%id))]
    pub async fn get(&self, id: &ResourceId) -> Result<Value> {
        debug!("Fetching tournament");
        self.dispatcher
            .send(Method::GET, &http::tournament(id), None)
            .await
    }

    /// Create a tournament from any JSON-serializable value.
    #[instrument(skip_all)]
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        debug!("Creating tournament");
        let payload = to_payload(data)?;
        self.dispatcher
            .send(Method::POST, http::TOURNAMENTS, Some(&payload))
            .await
    }
}
