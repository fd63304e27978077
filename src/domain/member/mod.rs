//! Member domain

mod directory;
mod entity;

pub use directory::{MemberDirectory, RequesterContext};
pub use entity::{Committee, Member, Position, Requester};
#[cfg(test)]
pub(crate) use entity::ALL_POSITIONS;
