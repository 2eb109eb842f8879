//! Shared response envelope types for API handlers.
//!
//! List endpoints use a `{ "data": [...] }` envelope; single resources are
//! returned bare.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
