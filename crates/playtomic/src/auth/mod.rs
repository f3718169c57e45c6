//! Authentication types and session management.
//!
//! [`AuthSession`] holds the credentials and the current token pair and
//! performs the login and refresh calls.

mod credentials;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use session::AuthSession;
pub use tokens::{AccessToken, RefreshToken, TokenPair};
