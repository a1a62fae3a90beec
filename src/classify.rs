//! Message classification for presentation layers
//!
//! Derives a display category (system / own / other participant) and an
//! event kind (connect / disconnect / plain) from a message's fields.
//! Pure and stateless: classification happens at read time against the
//! *current* local nickname, so it never goes stale when the local
//! identity changes between connections.

use crate::message::Message;
use crate::types::SYSTEM_NICKNAME;

/// Display category of a message relative to the local participant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Controller-generated event message
    System,
    /// Sent by the local participant
    Own,
    /// Sent by another participant
    Other,
}

/// Event subtype of a system message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A participant joined
    Connect,
    /// A participant left
    Disconnect,
    /// Ordinary chat content
    Plain,
}

/// A message annotated with its display category and event kind
///
/// Borrows the underlying message; the original is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedMessage<'a> {
    pub message: &'a Message,
    pub category: Category,
    pub event: EventKind,
}

/// Classify a message relative to the local participant's nickname
///
/// `local_nickname` is `None` before an identity has been set. The
/// disconnect check runs first: "disconnected" contains "connected" as a
/// substring, so the order is load-bearing.
pub fn classify<'a>(message: &'a Message, local_nickname: Option<&str>) -> ClassifiedMessage<'a> {
    let category = if message.nickname == SYSTEM_NICKNAME {
        Category::System
    } else if Some(message.nickname.as_str()) == local_nickname {
        Category::Own
    } else {
        Category::Other
    };

    let event = match category {
        Category::System if message.text.contains("disconnected") => EventKind::Disconnect,
        Category::System if message.text.contains("connected") => EventKind::Connect,
        _ => EventKind::Plain,
    };

    ClassifiedMessage {
        message,
        category,
        event,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::types::Gender;

    fn chat(nickname: &str, text: &str) -> Message {
        let identity = Identity::validate(nickname, Some(Gender::Male)).unwrap();
        Message::from_participant(&identity, text.to_string())
    }

    #[test]
    fn test_system_disconnect() {
        let msg = Message::system_disconnected("Alice");
        let classified = classify(&msg, Some("Alice"));

        assert_eq!(classified.category, Category::System);
        assert_eq!(classified.event, EventKind::Disconnect);
    }

    #[test]
    fn test_system_connect() {
        let msg = Message::system_connected("Alice");
        let classified = classify(&msg, Some("Bob"));

        assert_eq!(classified.category, Category::System);
        assert_eq!(classified.event, EventKind::Connect);
    }

    #[test]
    fn test_system_plain() {
        let msg = Message {
            nickname: "System".to_string(),
            gender: crate::types::MessageGender::Other,
            text: "maintenance in five minutes".to_string(),
        };
        let classified = classify(&msg, None);

        assert_eq!(classified.category, Category::System);
        assert_eq!(classified.event, EventKind::Plain);
    }

    #[test]
    fn test_own_message() {
        let msg = chat("Alice", "hello");
        let classified = classify(&msg, Some("Alice"));

        assert_eq!(classified.category, Category::Own);
        assert_eq!(classified.event, EventKind::Plain);
    }

    #[test]
    fn test_other_message() {
        let msg = chat("Bob", "hello");
        let classified = classify(&msg, Some("Alice"));

        assert_eq!(classified.category, Category::Other);
        assert_eq!(classified.event, EventKind::Plain);
    }

    #[test]
    fn test_no_local_identity() {
        let msg = chat("Bob", "hello");
        assert_eq!(classify(&msg, None).category, Category::Other);
    }

    #[test]
    fn test_chat_text_mentioning_connected_stays_plain() {
        // Event kinds only apply to system messages
        let msg = chat("Bob", "I almost got disconnected");
        let classified = classify(&msg, Some("Alice"));

        assert_eq!(classified.category, Category::Other);
        assert_eq!(classified.event, EventKind::Plain);
    }

    #[test]
    fn test_reclassification_follows_current_nickname() {
        let msg = chat("Alice", "hello");

        assert_eq!(classify(&msg, Some("Alice")).category, Category::Own);
        // Same stored message, new local identity
        assert_eq!(classify(&msg, Some("Alicia")).category, Category::Other);
    }
}
