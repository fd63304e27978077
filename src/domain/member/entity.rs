//! Member, committee and position types

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Organisational position, ordered by authority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// President
    Pres,
    /// Executive Vice President
    Evp,
    /// Vice President
    Vp,
    /// Associate Vice President
    Avp,
    /// Committee Trainee
    Ct,
    /// Junior Officer
    Jo,
    /// Member
    Mem,
}

impl Position {
    /// Parse a wire position id. Ids are case-sensitive.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "PRES" => Some(Self::Pres),
            "EVP" => Some(Self::Evp),
            "VP" => Some(Self::Vp),
            "AVP" => Some(Self::Avp),
            "CT" => Some(Self::Ct),
            "JO" => Some(Self::Jo),
            "MEM" => Some(Self::Mem),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Pres => "PRES",
            Self::Evp => "EVP",
            Self::Vp => "VP",
            Self::Avp => "AVP",
            Self::Ct => "CT",
            Self::Jo => "JO",
            Self::Mem => "MEM",
        }
    }

    /// Hierarchy level, higher means more authority
    fn level(self) -> u8 {
        match self {
            Self::Pres => 7,
            Self::Evp => 6,
            Self::Vp => 5,
            Self::Avp => 4,
            Self::Ct => 3,
            Self::Jo => 2,
            Self::Mem => 1,
        }
    }
}

#[cfg(test)]
pub(crate) const ALL_POSITIONS: [Position; 7] = [
    Position::Pres,
    Position::Evp,
    Position::Vp,
    Position::Avp,
    Position::Ct,
    Position::Jo,
    Position::Mem,
];

/// Positions order by authority, so `Position::Pres > Position::Avp`
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level().cmp(&other.level())
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Role snapshot of whoever is asking, taken at decision time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    #[serde(default)]
    pub committee_id: Option<String>,
    #[serde(default)]
    pub position_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Requester {
    pub fn committee(&self) -> Option<&str> {
        self.committee_id.as_deref()
    }

    pub fn position(&self) -> Option<Position> {
        self.position_id.as_deref().and_then(Position::parse)
    }
}

#[cfg(test)]
impl Requester {
    pub fn new(committee_id: impl Into<String>, position_id: impl Into<String>) -> Self {
        Self {
            committee_id: Some(committee_id.into()),
            position_id: Some(position_id.into()),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Member profile as returned by the core API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub committee_id: Option<String>,
    #[serde(default)]
    pub committee_name: Option<String>,
    #[serde(default)]
    pub division_id: Option<String>,
    #[serde(default)]
    pub division_name: Option<String>,
    #[serde(default)]
    pub position_id: Option<String>,
    #[serde(default)]
    pub position_name: Option<String>,
    #[serde(default)]
    pub house_name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub fb_link: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
}

impl Member {
    /// Role snapshot used by the authorization gate
    pub fn requester(&self) -> Requester {
        Requester {
            committee_id: self.committee_id.clone(),
            position_id: self.position_id.clone(),
            email: Some(self.email.clone()),
        }
    }
}

/// Committee as listed by the core API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committee {
    pub committee_id: String,
    pub committee_name: String,
    #[serde(default)]
    pub committee_head: Option<i32>,
    #[serde(default)]
    pub division_id: Option<String>,
}
