//! playtomic - Playtomic API client
//!
//! This library logs a user in to the Playtomic API, keeps the access and
//! refresh tokens, and sends authenticated JSON requests. An expired access
//! token is refreshed and the request retried exactly once.
//!
//! # Example
//!
//! ```no_run
//! use playtomic::{ClientConfig, Credentials, PlaytomicClient, ResourceId};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), playtomic::Error> {
//! let config = ClientConfig::default();
//! let credentials = Credentials::new("player@example.com", "password");
//! let client = PlaytomicClient::with_config(config, credentials).await?;
//!
//! let id = ResourceId::new("5d8a1f3e-6b2c-4e7a-9f10-2c3d4e5f6a7b")?;
//! let tournament = client.tournaments().get(&id).await?;
//! println!("{}", tournament);
//!
//! let created = client
//!     .tournaments()
//!     .create(&json!({"tournament_name": "Friday Americano"}))
//!     .await?;
//! println!("{}", created);
//! # Ok(())
//! # }
//! ```
//!
//! The library emits `tracing` events and spans but never installs a
//! subscriber; that is left to the application.

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod resources;
pub mod types;

mod client;

#[cfg(test)]
mod testing;

// Re-export primary types at crate root for convenience
pub use auth::{AuthSession, Credentials};
pub use client::PlaytomicClient;
pub use config::ClientConfig;
pub use dispatch::RequestDispatcher;
pub use error::Error;
pub use types::{BaseUrl, ResourceId};

pub use reqwest::Method;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
