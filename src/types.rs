//! Basic type definitions for the chat session
//!
//! Provides the shared enums, newtypes and protocol constants:
//! - `SessionId`: UUID-based session identifier used for log correlation
//! - `Gender`: the gender a participant picks when joining
//! - `MessageGender`: the gender field carried on a wire message

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved nickname used by controller-generated event messages.
pub const SYSTEM_NICKNAME: &str = "System";

/// Minimum nickname length in characters (inclusive).
pub const NICKNAME_MIN_LEN: usize = 3;

/// Maximum nickname length in characters (inclusive).
pub const NICKNAME_MAX_LEN: usize = 15;

/// Maximum chat message length in characters.
pub const MESSAGE_MAX_LEN: usize = 1000;

/// Unique session identifier (newtype pattern)
///
/// Wraps a UUID v4 so log lines from independent sessions in the same
/// process can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender a participant selects when joining
///
/// Closed set: system messages are not represented here, see
/// [`MessageGender::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

/// Gender field carried on a wire message
///
/// `Other` marks controller-generated system messages; user messages
/// convert from [`Gender`], which has no such variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageGender {
    Male,
    Female,
    Other,
}

impl From<Gender> for MessageGender {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => MessageGender::Male,
            Gender::Female => MessageGender::Female,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_unique() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_message_gender_from_gender() {
        assert_eq!(MessageGender::from(Gender::Male), MessageGender::Male);
        assert_eq!(MessageGender::from(Gender::Female), MessageGender::Female);
    }
}
