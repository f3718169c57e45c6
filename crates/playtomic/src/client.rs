//! The top-level API client.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::Result;
use crate::auth::{AuthSession, Credentials};
use crate::config::ClientConfig;
use crate::dispatch::RequestDispatcher;
use crate::resources::{Tenants, Tournaments};
use crate::types::ResourceId;

/// An authenticated Playtomic API client.
///
/// Constructing a client logs in immediately. Clients are cheap to clone
/// (they use an internal `Arc`) and clones share one token pair.
///
/// # Example
///
/// ```no_run
/// use playtomic::{PlaytomicClient, ResourceId};
///
/// # async fn example() -> Result<(), playtomic::Error> {
/// let client = PlaytomicClient::new("player@example.com", "password").await?;
///
/// let id = ResourceId::new("5d8a1f3e-6b2c-4e7a-9f10-2c3d4e5f6a7b")?;
/// let tenant = client.tenants().get(&id).await?;
/// println!("{}", tenant["tenant_name"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PlaytomicClient {
    inner: Arc<RequestDispatcher>,
}

impl PlaytomicClient {
    /// Log in against the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the login fails or the API is unreachable.
    pub async fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::default(), Credentials::new(email, password)).await
    }

    /// Log in with an explicit configuration.
    #[instrument(skip_all, fields(base_url = %config.base_url, email = %credentials.email()))]
    pub async fn with_config(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        let session = AuthSession::new(config, credentials)?;
        let client = Self::from_session(session);
        client.session().login().await?;
        info!("Client ready");
        Ok(client)
    }

    /// Wrap an existing session without logging in.
    ///
    /// Requests made before a successful [`AuthSession::login`] carry no
    /// `Authorization` header.
    pub fn from_session(session: AuthSession) -> Self {
        Self {
            inner: Arc::new(RequestDispatcher::new(session)),
        }
    }

    pub fn session(&self) -> &AuthSession {
        self.inner.session()
    }

    pub fn tenants(&self) -> Tenants<'_> {
        Tenants::new(&self.inner)
    }

    pub fn tournaments(&self) -> Tournaments<'_> {
        Tournaments::new(&self.inner)
    }

    /// Send a raw request to an API path such as `/v1/tenants/abc`.
    pub async fn send(&self, method: Method, path: &str, payload: Option<&Value>) -> Result<Value> {
        self.inner.send(method, path, payload).await
    }

    // ========================================================================
    // Shorthands
    // ========================================================================

    pub async fn get_tenant(&self, tenant_id: &str) -> Result<Value> {
        let id = ResourceId::new(tenant_id)?;
        self.tenants().get(&id).await
    }

    pub async fn create_tenant<T: Serialize + ?Sized>(&self, tenant: &T) -> Result<Value> {
        self.tenants().create(tenant).await
    }

    pub async fn get_tournament(&self, tournament_id: &str) -> Result<Value> {
        let id = ResourceId::new(tournament_id)?;
        self.tournaments().get(&id).await
    }

    pub async fn create_tournament<T: Serialize + ?Sized>(&self, tournament: &T) -> Result<Value> {
        self.tournaments().create(tournament).await
    }
}

impl std::fmt::Debug for PlaytomicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaytomicClient")
            .field("session", self.session())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::error::{Error, InvalidInputError};
    use crate::testing::ScriptedTransport;

    fn client(transport: ScriptedTransport) -> PlaytomicClient {
        PlaytomicClient::from_session(AuthSession::with_transport(
            ClientConfig::default(),
            Credentials::new("player@example.com", "secret"),
            transport,
        ))
    }

    #[tokio::test]
    async fn shorthands_hit_resource_paths() {
        let transport = ScriptedTransport::new()
            .respond(StatusCode::OK, json!({"tenant_id": "t1"}))
            .respond(StatusCode::OK, json!({"tenant_id": "t2"}))
            .respond(StatusCode::OK, json!({"tournament_id": "x1"}))
            .respond(StatusCode::OK, json!({"tournament_id": "x2"}));
        let client = client(transport.clone());

        client.get_tenant("t1").await.unwrap();
        client.create_tenant(&json!({"tenant_name": "Club"})).await.unwrap();
        client.get_tournament("x1").await.unwrap();
        client
            .create_tournament(&json!({"name": "Open"}))
            .await
            .unwrap();

        let seen: Vec<(Method, String)> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.url))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Method::GET, "https://api.playtomic.io/v1/tenants/t1".to_string()),
                (Method::POST, "https://api.playtomic.io/v2/tenants".to_string()),
                (Method::GET, "https://api.playtomic.io/v2/tournaments/x1".to_string()),
                (Method::POST, "https://api.playtomic.io/v2/tournaments".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_id_is_rejected_before_sending() {
        let transport = ScriptedTransport::new();
        let client = client(transport.clone());

        let err = client.get_tenant("../v3/auth/login").await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::ResourceId { .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn clones_share_tokens() {
        let transport = ScriptedTransport::new()
            .respond(StatusCode::OK, json!({"access_token": "a1", "refresh_token": "r1"}));
        let client = client(transport);
        let clone = client.clone();

        client.session().login().await.unwrap();
        assert_eq!(clone.session().export_access_token().await.as_deref(), Some("a1"));
    }

    #[test]
    fn debug_hides_secrets() {
        let client = client(ScriptedTransport::new());
        let debug = format!("{:?}", client);
        assert!(debug.contains("PlaytomicClient"));
        assert!(!debug.contains("secret"));
    }
}
