//! Who may request and manage API keys
//!
//! Plain predicates over a [`Requester`] snapshot. Missing committee or
//! position data is treated exactly like the wrong value.

use serde::Serialize;

use crate::domain::member::{Position, Requester};

/// Committee allowed to see, request and revoke keys
pub const KEY_MANAGEMENT_COMMITTEE: &str = "RND";

/// Positions allowed to request new keys
pub const KEY_REQUEST_POSITIONS: [Position; 4] =
    [Position::Avp, Position::Vp, Position::Evp, Position::Pres];

pub const REQUEST_DENIED_MESSAGE: &str =
    "API key request is only available to RND committee members with AVP position or higher.";

pub const MANAGE_DENIED_MESSAGE: &str =
    "API Key management is only available to RND committee members.";

fn in_key_committee(requester: &Requester) -> bool {
    requester.committee() == Some(KEY_MANAGEMENT_COMMITTEE)
}

fn in_request_tier(requester: &Requester) -> bool {
    requester
        .position()
        .is_some_and(|p| KEY_REQUEST_POSITIONS.contains(&p))
}

/// True iff the requester is RND and holds an AVP-or-higher position
pub fn can_request_key(requester: &Requester) -> bool {
    in_key_committee(requester) && in_request_tier(requester)
}

/// True iff the requester is RND. Position does not matter.
pub fn can_manage_keys(requester: &Requester) -> bool {
    in_key_committee(requester)
}

/// Both capabilities for one requester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyCapabilities {
    pub can_request_key: bool,
    pub can_manage_keys: bool,
}

impl KeyCapabilities {
    pub fn of(requester: &Requester) -> Self {
        Self {
            can_request_key: can_request_key(requester),
            can_manage_keys: can_manage_keys(requester),
        }
    }
}
