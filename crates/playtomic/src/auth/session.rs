//! Credential and token holder that performs login and refresh.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::Result;
use crate::config::ClientConfig;
use crate::error::{AuthError, AuthOperation, Error, InvalidStateError, error_message};
use crate::http::{
    HttpRequest, LOGIN, LoginRequest, REFRESH, RefreshRequest, ReqwestTransport, TokenResponse,
    Transport,
};

use super::credentials::Credentials;
use super::tokens::TokenPair;

/// Holds the credentials and current tokens for one client.
///
/// The session exclusively owns its transport. Token reads for header
/// building take a shared lock; login and refresh hold the exclusive lock
/// for the whole call, so concurrent refreshes are serialized.
pub struct AuthSession {
    credentials: Credentials,
    config: ClientConfig,
    transport: Box<dyn Transport>,
    tokens: RwLock<Option<TokenPair>>,
}

impl AuthSession {
    /// Create an unauthenticated session using the reqwest transport.
    ///
    /// No request is made; call [`AuthSession::login`] before sending.
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, credentials, transport))
    }

    /// Create an unauthenticated session over a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        credentials: Credentials,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            credentials,
            config,
            transport: Box::new(transport),
            tokens: RwLock::new(None),
        }
    }

    /// Log in with the session credentials, replacing any current tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the API rejects the credentials, answers
    /// without both tokens, or cannot be reached.
    #[instrument(skip(self), fields(email = %self.credentials.email()))]
    pub async fn login(&self) -> Result<()> {
        debug!("Authenticating user");

        let mut tokens = self.tokens.write().await;
        let body = LoginRequest {
            email: self.credentials.email(),
            password: self.credentials.password(),
        };
        let pair = self.acquire(AuthOperation::Login, LOGIN, &body).await?;
        *tokens = Some(pair);

        info!("User authenticated successfully");
        Ok(())
    }

    /// Exchange the current refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if no login has succeeded yet, and
    /// [`Error::Auth`] under the same conditions as [`AuthSession::login`].
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        debug!("Refreshing access token");

        let mut tokens = self.tokens.write().await;
        let Some(refresh_token) = tokens.as_ref().map(|pair| pair.refresh_token.clone()) else {
            let err = InvalidStateError::NotAuthenticated;
            error!(error = %err, "Token refresh failed");
            return Err(err.into());
        };

        let body = RefreshRequest {
            refresh_token: refresh_token.as_str(),
        };
        let pair = self.acquire(AuthOperation::Refresh, REFRESH, &body).await?;
        *tokens = Some(pair);

        info!("Access token refreshed successfully");
        Ok(())
    }

    /// Headers for the next request.
    ///
    /// Always carries `Content-Type: application/json`; adds the bearer
    /// `Authorization` header once a login has succeeded.
    pub async fn headers(&self) -> HeaderMap {
        let tokens = self.tokens.read().await;
        let mut headers = json_headers();
        if let Some(pair) = tokens.as_ref() {
            headers.insert(AUTHORIZATION, pair.access_token.bearer().clone());
        }
        headers
    }

    /// Whether a login has succeeded.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.read().await.is_some()
    }

    /// Export the current access token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub async fn export_access_token(&self) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens
            .as_ref()
            .map(|pair| pair.access_token.as_str().to_string())
    }

    /// Export the current refresh token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It can be used to obtain new access tokens.
    pub async fn export_refresh_token(&self) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens
            .as_ref()
            .map(|pair| pair.refresh_token.as_str().to_string())
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// POST an auth body and turn the response into a token pair.
    async fn acquire<B: serde::Serialize>(
        &self,
        operation: AuthOperation,
        path: &str,
        body: &B,
    ) -> Result<TokenPair> {
        let request = HttpRequest::new(
            Method::POST,
            self.config.base_url.endpoint(path),
            json_headers(),
        )
        .with_json(body)?;

        let result = self.exchange(operation, request).await;
        if let Err(ref err) = result {
            error!(error = %err, %operation, "Authentication request failed");
        }
        result.map_err(Error::from)
    }

    async fn exchange(
        &self,
        operation: AuthOperation,
        request: HttpRequest,
    ) -> std::result::Result<TokenPair, AuthError> {
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|source| AuthError::Transport { operation, source })?;

        if !response.status.is_success() {
            return Err(AuthError::Rejected {
                operation,
                status: response.status.as_u16(),
                message: error_message(&response.body),
            });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&response.body).map_err(|e| AuthError::MalformedResponse {
                operation,
                reason: e.to_string(),
            })?;

        let access_token = non_empty(parsed.access_token).ok_or(AuthError::MissingToken {
            operation,
            field: "access_token",
        })?;
        let refresh_token = non_empty(parsed.refresh_token).ok_or(AuthError::MissingToken {
            operation,
            field: "refresh_token",
        })?;

        TokenPair::new(access_token, refresh_token).map_err(|_| AuthError::MalformedResponse {
            operation,
            reason: "access_token is not a valid header value".to_string(),
        })
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("credentials", &self.credentials)
            .field("base_url", &self.config.base_url)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
