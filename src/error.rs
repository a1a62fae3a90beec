//! Error types for the chat session
//!
//! Defines identity validation errors, session-level errors and
//! transport errors. Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Identity validation errors
///
/// Produced by [`crate::identity::Identity::validate`]. All are
/// user-correctable; only the first failing check is reported per call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// Nickname is the reserved "System" name (any casing)
    #[error("Nickname cannot be 'System'. Please choose a different nickname.")]
    ReservedNickname,

    /// Nickname length outside the allowed range
    #[error("Nickname must be between 3 and 15 characters long.")]
    NicknameLength { length: usize },

    /// No gender selected
    #[error("Please select a gender.")]
    MissingGender,
}

/// Session-level errors
///
/// Covers join-time validation failures, send-time rejections and
/// transport failures. None are fatal; the caller corrects the input
/// and retries.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Join rejected by the identity validator
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Join attempted while already connected
    #[error("Already connected to the chat")]
    AlreadyConnected,

    /// Send or leave attempted while disconnected
    #[error("Not connected to the chat")]
    NotConnected,

    /// Message exceeds the 1000 character cap
    #[error("Message must be under 1000 characters.")]
    MessageTooLong { length: usize },

    /// Message text is empty
    #[error("Message text must not be empty")]
    EmptyMessage,

    /// Underlying transport failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Transport errors
///
/// Failures of the bidirectional connection the session runs over.
#[derive(Debug, Error)]
pub enum TransportError {
    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection is not open, or the peer side has gone away
    #[error("Connection closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_error_messages() {
        assert_eq!(
            IdentityError::ReservedNickname.to_string(),
            "Nickname cannot be 'System'. Please choose a different nickname."
        );
        assert_eq!(
            IdentityError::NicknameLength { length: 2 }.to_string(),
            "Nickname must be between 3 and 15 characters long."
        );
        assert_eq!(IdentityError::MissingGender.to_string(), "Please select a gender.");
    }

    #[test]
    fn test_identity_error_is_transparent() {
        let err = SessionError::from(IdentityError::MissingGender);
        assert_eq!(err.to_string(), IdentityError::MissingGender.to_string());
    }
}
