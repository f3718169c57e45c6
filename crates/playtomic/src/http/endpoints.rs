//! API endpoint paths and auth request/response bodies.

use serde::{Deserialize, Serialize};

use crate::types::ResourceId;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST: exchange email and password for a token pair.
pub const LOGIN: &str = "/v3/auth/login";

/// POST: exchange a refresh token for a new token pair.
pub const REFRESH: &str = "/v3/auth/refresh";

/// POST: create a tenant.
pub const TENANTS: &str = "/v2/tenants";

/// POST: create a tournament.
pub const TOURNAMENTS: &str = "/v2/tournaments";

/// GET: a single tenant. Tenant reads are still served from v1.
pub fn tenant(id: &ResourceId) -> String {
    format!("/v1/tenants/{}", id)
}

/// GET: a single tournament.
pub fn tournament(id: &ResourceId) -> String {
    format!("{}/{}", TOURNAMENTS, id)
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for refresh.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from login and refresh.
///
/// Both fields are optional on the wire; the session rejects a response
/// that lacks either one.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}
