//! Validated API types.

mod base_url;
mod resource_id;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use resource_id::ResourceId;
