//! LSCS core API integration
//!
//! The portal owns no key or member storage. Every key and member
//! operation is forwarded to the core API with the caller's session.

mod client;
mod wire;

pub use client::{LscsClient, SessionCredentials, SESSION_COOKIE};
