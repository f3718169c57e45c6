//! Resource endpoints.
//!
//! Each accessor borrows the client's dispatcher and turns `get`/`create`
//! calls into [`RequestDispatcher::send`](crate::dispatch::RequestDispatcher::send)
//! calls. Payloads are forwarded without schema validation.

mod tenant;
mod tournament;

pub use tenant::Tenants;
pub use tournament::Tournaments;

use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::error::InvalidInputError;

fn to_payload<T: Serialize + ?Sized>(data: &T) -> Result<Value> {
    serde_json::to_value(data).map_err(|e| {
        InvalidInputError::Payload {
            reason: e.to_string(),
        }
        .into()
    })
}
