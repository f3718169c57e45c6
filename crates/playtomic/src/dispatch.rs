//! Authenticated request dispatch with a single refresh-and-retry.

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::Result;
use crate::auth::AuthSession;
use crate::error::{Error, HttpError, InvalidResponseError, error_message};
use crate::http::{HttpRequest, HttpResponse};

/// One API call before it is turned into HTTP.
#[derive(Debug, Clone, Copy)]
pub struct LogicalRequest<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub payload: Option<&'a Value>,
}

/// Where a single `send()` call stands.
///
/// A call starts at `Initial`. A 401 there moves it to `Refreshed` after a
/// successful token refresh; any failure in `Refreshed` ends the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Refreshed,
}

/// Sends API requests through an [`AuthSession`], recovering from an
/// expired access token at most once per call.
#[derive(Debug)]
pub struct RequestDispatcher {
    session: AuthSession,
}

impl RequestDispatcher {
    pub fn new(session: AuthSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Send a request and return the parsed JSON body.
    ///
    /// A 401 on the first attempt triggers one token refresh and one retry.
    /// A failure of the retry, including another 401, is returned as is.
    /// A success with an empty body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`Error::Http`] for a non-success status
    /// - [`Error::Auth`] or [`Error::InvalidState`] if the refresh fails
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::InvalidResponse`] if a success body is not JSON
    #[instrument(skip_all, fields(%method, path))]
    pub async fn send(&self, method: Method, path: &str, payload: Option<&Value>) -> Result<Value> {
        let request = LogicalRequest {
            method: &method,
            path,
            payload,
        };

        let mut attempt = Attempt::Initial;
        loop {
            let response = self.issue(request).await?;
            if response.status.is_success() {
                return parse_body(request, response);
            }

            let err = HttpError::new(
                response.status.as_u16(),
                request.method.as_str(),
                request.path,
                error_message(&response.body),
            );

            match attempt {
                Attempt::Initial if err.is_unauthorized() => {
                    warn!("Access token expired, refreshing");
                    self.session.refresh().await?;
                    attempt = Attempt::Refreshed;
                }
                _ => {
                    error!(error = %err, "Request failed");
                    return Err(err.into());
                }
            }
        }
    }

    async fn issue(&self, request: LogicalRequest<'_>) -> Result<HttpResponse> {
        let headers = self.session.headers().await;
        let url = self.session.config().base_url.endpoint(request.path);
        let http = HttpRequest::new(request.method.clone(), url, headers)
            .with_body(request.payload.cloned());

        self.session.transport().execute(http).await.map_err(|err| {
            error!(error = %err, "Request failed");
            Error::from(err)
        })
    }
}

fn parse_body(request: LogicalRequest<'_>, response: HttpResponse) -> Result<Value> {
    if response.body.trim().is_empty() {
        debug!(status = response.status.as_u16(), "Empty response body");
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|e| {
        let err = InvalidResponseError {
            status: response.status.as_u16(),
            path: request.path.to_string(),
            reason: e.to_string(),
        };
        error!(error = %err, "Response body is not JSON");
        err.into()
    })
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use reqwest::header::AUTHORIZATION;
    use serde_json::json;

    use super::*;
    use crate::auth::Credentials;
    use crate::config::ClientConfig;
    use crate::error::{AuthError, InvalidStateError, TransportError};
    use crate::testing::ScriptedTransport;

    fn dispatcher(transport: ScriptedTransport) -> RequestDispatcher {
        RequestDispatcher::new(AuthSession::with_transport(
            ClientConfig::default(),
            Credentials::new("player@example.com", "secret"),
            transport,
        ))
    }

    /// A dispatcher whose session already holds a1/r1.
    async fn logged_in(transport: ScriptedTransport) -> RequestDispatcher {
        let dispatcher = dispatcher(transport);
        dispatcher.session().login().await.unwrap();
        dispatcher
    }

    fn login_ok(transport: ScriptedTransport) -> ScriptedTransport {
        transport.respond(StatusCode::OK, json!({"access_token": "a1", "refresh_token": "r1"}))
    }

    #[tokio::test]
    async fn success_returns_body_after_one_call() {
        let transport = login_ok(ScriptedTransport::new())
            .respond(StatusCode::OK, json!({"tenant_id": "t1", "name": "Club"}));
        let dispatcher = logged_in(transport.clone()).await;

        let body = dispatcher
            .send(Method::GET, "/v1/tenants/t1", None)
            .await
            .unwrap();

        assert_eq!(body, json!({"tenant_id": "t1", "name": "Club"}));
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url, "https://api.playtomic.io/v1/tenants/t1");
        assert_eq!(requests[1].headers.get(AUTHORIZATION).unwrap(), "Bearer a1");
    }

    #[tokio::test]
    async fn unauthorized_refreshes_and_retries_once() {
        let transport = login_ok(ScriptedTransport::new())
            .respond(StatusCode::UNAUTHORIZED, json!({"message": "expired"}))
            .respond(StatusCode::OK, json!({"access_token": "a2", "refresh_token": "r2"}))
            .respond(StatusCode::OK, json!({"tournament_id": "x"}));
        let dispatcher = logged_in(transport.clone()).await;

        let body = dispatcher
            .send(Method::GET, "/v2/tournaments/x", None)
            .await
            .unwrap();

        assert_eq!(body, json!({"tournament_id": "x"}));
        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[2].url, "https://api.playtomic.io/v3/auth/refresh");
        assert_eq!(requests[3].url, "https://api.playtomic.io/v2/tournaments/x");
        assert_eq!(requests[3].headers.get(AUTHORIZATION).unwrap(), "Bearer a2");
    }

    #[tokio::test]
    async fn second_unauthorized_is_not_retried() {
        let transport = login_ok(ScriptedTransport::new())
            .respond(StatusCode::UNAUTHORIZED, json!({}))
            .respond(StatusCode::OK, json!({"access_token": "a2", "refresh_token": "r2"}))
            .respond(StatusCode::UNAUTHORIZED, json!({"message": "still expired"}));
        let dispatcher = logged_in(transport.clone()).await;

        let err = dispatcher
            .send(Method::GET, "/v1/tenants/t1", None)
            .await
            .unwrap_err();

        match err {
            Error::Http(err) => {
                assert_eq!(err.status, 401);
                assert_eq!(err.message.as_deref(), Some("still expired"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let transport = login_ok(ScriptedTransport::new())
            .respond_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        let dispatcher = logged_in(transport.clone()).await;

        let err = dispatcher
            .send(Method::POST, "/v2/tenants", Some(&json!({"name": "Club"})))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("POST /v2/tenants"));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_propagates_and_does_not_poison_session() {
        let transport = login_ok(ScriptedTransport::new())
            .respond(StatusCode::UNAUTHORIZED, json!({}))
            .respond(StatusCode::BAD_REQUEST, json!({"message": "bad refresh token"}))
            .respond(StatusCode::OK, json!({"ok": true}));
        let dispatcher = logged_in(transport.clone()).await;

        let err = dispatcher
            .send(Method::GET, "/v1/tenants/t1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::Rejected { status: 400, .. })));
        assert_eq!(transport.requests().len(), 3);

        let body = dispatcher
            .send(Method::GET, "/v1/tenants/t1", None)
            .await
            .unwrap();
        assert_eq!(body, json!({"ok": true}));
        assert_eq!(
            transport.requests()[3].headers.get(AUTHORIZATION).unwrap(),
            "Bearer a1"
        );
    }

    #[tokio::test]
    async fn unauthorized_without_login_is_invalid_state() {
        let transport = ScriptedTransport::new().respond(StatusCode::UNAUTHORIZED, json!({}));
        let dispatcher = dispatcher(transport.clone());

        let err = dispatcher
            .send(Method::GET, "/v1/tenants/t1", None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidState(InvalidStateError::NotAuthenticated)
        ));
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn payload_is_sent_as_body() {
        let transport = login_ok(ScriptedTransport::new())
            .respond(StatusCode::CREATED, json!({"tenant_id": "new"}));
        let dispatcher = logged_in(transport.clone()).await;

        let payload = json!({"tenant_name": "Club Padel"});
        dispatcher
            .send(Method::POST, "/v2/tenants", Some(&payload))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[1].method, Method::POST);
        assert_eq!(requests[1].body, Some(payload));
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let transport =
            login_ok(ScriptedTransport::new()).respond_text(StatusCode::NO_CONTENT, "");
        let dispatcher = logged_in(transport).await;

        let body = dispatcher
            .send(Method::POST, "/v2/tournaments", Some(&json!({})))
            .await
            .unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn non_json_success_body_is_invalid_response() {
        let transport =
            login_ok(ScriptedTransport::new()).respond_text(StatusCode::OK, "<html></html>");
        let dispatcher = logged_in(transport).await;

        let err = dispatcher
            .send(Method::GET, "/v1/tenants/t1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn transport_failure_is_not_retried() {
        let transport = login_ok(ScriptedTransport::new()).fail(TransportError::Timeout {
            message: "operation timed out".into(),
        });
        let dispatcher = logged_in(transport.clone()).await;

        let err = dispatcher
            .send(Method::GET, "/v1/tenants/t1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Timeout { .. })));
        assert_eq!(transport.requests().len(), 2);
    }
}
