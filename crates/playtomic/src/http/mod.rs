//! HTTP plumbing.
//!
//! This module provides the [`Transport`] seam the session sends requests
//! through, its reqwest implementation, and the API endpoint definitions.

mod endpoints;
mod transport;

pub(crate) use endpoints::*;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
