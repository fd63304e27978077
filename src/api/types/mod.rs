//! Request and response types for the portal API

pub mod error;
pub mod json;
pub mod keys;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use keys::{KeyListResponse, KeyListing, MessageResponse, PermissionsResponse};
