//! Bearer token types.

use std::fmt;

use reqwest::header::{HeaderValue, InvalidHeaderValue};

/// A short-lived bearer token for authenticated requests.
///
/// The `Authorization` header value is built once, when the token is
/// received, and marked sensitive.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    raw: String,
    bearer: HeaderValue,
}

impl AccessToken {
    pub(crate) fn new(token: impl Into<String>) -> Result<Self, InvalidHeaderValue> {
        let raw = token.into();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", raw))?;
        bearer.set_sensitive(true);
        Ok(Self { raw, bearer })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.raw
    }

    /// The ready-made `Authorization` header value.
    pub(crate) fn bearer(&self) -> &HeaderValue {
        &self.bearer
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A longer-lived token exchanged for a fresh [`TokenPair`].
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Use only when constructing the refresh request body.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// Access and refresh token issued together by a login or refresh call.
///
/// A pair is always replaced wholesale; the two tokens never change
/// independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

impl TokenPair {
    pub(crate) fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            access_token: AccessToken::new(access_token)?,
            refresh_token: RefreshToken::new(refresh_token),
        })
    }
}
