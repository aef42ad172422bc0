use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Profile identifier as stored.
///
/// Profiles written by the browser front end carry millisecond timestamps;
/// profiles created here carry UUID strings. Both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    Number(i64),
    Text(String),
}

impl ProfileId {
    /// Fresh random identifier for a new draft
    pub fn generate() -> Self {
        ProfileId::Text(Uuid::new_v4().to_string())
    }

    /// Parses a path segment: all-digit segments are numeric ids
    pub fn from_segment(segment: &str) -> Self {
        match segment.parse::<i64>() {
            Ok(n) => ProfileId::Number(n),
            Err(_) => ProfileId::Text(segment.to_string()),
        }
    }
}

impl Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileId::Number(n) => write!(f, "{}", n),
            ProfileId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A locally stored user identity with display preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Assigned once when the draft is created; never changes
    pub id: ProfileId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nick_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub email: String,
}

impl Profile {
    /// Creates an empty profile with a fresh identifier
    pub fn draft() -> Self {
        Self {
            id: ProfileId::generate(),
            name: String::new(),
            nick_name: String::new(),
            gender: String::new(),
            country: String::new(),
            language: String::new(),
            timezone: String::new(),
            email: String::new(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Avatar letter: first character of the name, `U` when unnamed
    pub fn display_initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }

    /// Name shown in the welcome banner
    pub fn welcome_name(&self) -> &str {
        if self.has_name() {
            self.name.trim()
        } else {
            "User"
        }
    }
}

/// Single-profile record written by older front-end builds
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LegacyUserProfile {
    #[serde(default)]
    pub name: String,
}
