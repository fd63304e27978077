//! API Key infrastructure implementations

mod error;
#[cfg(test)]
mod in_memory;
mod service;

pub use error::KeyRequestError;
#[cfg(test)]
pub use in_memory::InMemoryKeyIssuer;
pub use service::KeyRequestService;
