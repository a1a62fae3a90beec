//! Wire message model
//!
//! The flat JSON object every participant exchanges:
//! `{"nickname": "...", "gender": "...", "text": "..."}`.
//! Messages are immutable once constructed. The controller builds system
//! events through the dedicated constructors; the reserved "System"
//! nickname stays un-impersonable because the identity validator rejects
//! it at join time.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::types::{MessageGender, SYSTEM_NICKNAME};

/// Text suffix of a connect event.
pub const CONNECTED_SUFFIX: &str = "has connected to the chat";

/// Text suffix of a disconnect event.
pub const DISCONNECTED_SUFFIX: &str = "has disconnected from the chat";

/// A single chat message as it travels over the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender nickname, or the reserved "System"
    pub nickname: String,
    /// Sender gender; `other` only on system messages
    pub gender: MessageGender,
    /// Message body
    pub text: String,
}

impl Message {
    /// Build a chat message tagged with a participant identity
    pub fn from_participant(identity: &Identity, text: String) -> Self {
        Self {
            nickname: identity.nickname().to_string(),
            gender: identity.gender().into(),
            text,
        }
    }

    /// Build the system message announcing that a participant joined
    pub fn system_connected(nickname: &str) -> Self {
        Self::system(format!("{} {}", nickname, CONNECTED_SUFFIX))
    }

    /// Build the system message announcing that a participant left
    pub fn system_disconnected(nickname: &str) -> Self {
        Self::system(format!("{} {}", nickname, DISCONNECTED_SUFFIX))
    }

    fn system(text: String) -> Self {
        Self {
            nickname: SYSTEM_NICKNAME.to_string(),
            gender: MessageGender::Other,
            text,
        }
    }

    /// Whether this is a controller-generated system message
    pub fn is_system(&self) -> bool {
        self.nickname == SYSTEM_NICKNAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gender;

    #[test]
    fn test_participant_message_fields() {
        let identity = Identity::validate("Alice", Some(Gender::Female)).unwrap();
        let msg = Message::from_participant(&identity, "hello".to_string());

        assert_eq!(msg.nickname, "Alice");
        assert_eq!(msg.gender, MessageGender::Female);
        assert_eq!(msg.text, "hello");
        assert!(!msg.is_system());
    }

    #[test]
    fn test_system_connected_text() {
        let msg = Message::system_connected("Alice");

        assert_eq!(msg.nickname, "System");
        assert_eq!(msg.gender, MessageGender::Other);
        assert_eq!(msg.text, "Alice has connected to the chat");
        assert!(msg.is_system());
    }

    #[test]
    fn test_system_disconnected_text() {
        let msg = Message::system_disconnected("Bob");
        assert_eq!(msg.text, "Bob has disconnected from the chat");
    }

    #[test]
    fn test_message_serialize() {
        let msg = Message::system_connected("Alice");
        let json = serde_json::to_string(&msg).unwrap();

        assert!(json.contains("\"nickname\":\"System\""));
        assert!(json.contains("\"gender\":\"other\""));
        assert!(json.contains("\"text\":\"Alice has connected to the chat\""));
    }

    #[test]
    fn test_message_deserialize() {
        let json = r#"{"nickname": "Bob", "gender": "male", "text": "hi there"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();

        assert_eq!(msg.nickname, "Bob");
        assert_eq!(msg.gender, MessageGender::Male);
        assert_eq!(msg.text, "hi there");
    }
}
