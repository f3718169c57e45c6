//! Tenant (club) endpoints.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::Result;
use crate::dispatch::RequestDispatcher;
use crate::http;
use crate::types::ResourceId;

use super::to_payload;

/// Tenant operations, obtained from [`PlaytomicClient::tenants`](crate::PlaytomicClient::tenants).
#[derive(Debug, Clone, Copy)]
pub struct Tenants<'a> {
    dispatcher: &'a RequestDispatcher,
}

impl<'a> Tenants<'a> {
    pub(crate) fn new(dispatcher: &'a RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fetch a tenant by id.
    #[instrument(skip_all, fields(%id))]
    pub async fn get(&self, id: &ResourceId) -> Result<Value> {
        debug!("Fetching tenant");
        self.dispatcher
            .send(Method::GET, &http::tenant(id), None)
            .await
    }

    /// Create a tenant from any JSON-serializable value.
    #[instrument(skip_all)]
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value> {
        debug!("Creating tenant");
        let payload = to_payload(data)?;
        self.dispatcher
            .send(Method::POST, http::TENANTS, Some(&payload))
            .await
    }
}
