//! Session controller
//!
//! Owns the canonical session state: the validated identity, the
//! connection state and the append-only message history. Orchestrates
//! identity validation, transport lifecycle and system-event injection.
//!
//! All entry points take `&mut self`, so appends from inbound delivery
//! (via [`Session::recv`]) and from local sends are serialized in the
//! order the transport delivered or accepted them.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::classify::{classify, ClassifiedMessage};
use crate::error::{IdentityError, SessionError};
use crate::identity::Identity;
use crate::message::Message;
use crate::transport::Transport;
use crate::types::{Gender, SessionId, MESSAGE_MAX_LEN};

/// Connection state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// A single participant's chat session over a transport
///
/// Invariants:
/// - `history` is append-only, in transport order
/// - `Connected` implies a validated identity is set
/// - `identity` survives `leave`, so re-joining needs no re-entry
pub struct Session<T: Transport> {
    id: SessionId,
    transport: T,
    identity: Option<Identity>,
    state: ConnectionState,
    history: Vec<Message>,
    inbound: Option<mpsc::Receiver<Message>>,
    last_validation_error: Option<IdentityError>,
}

impl<T: Transport> Session<T> {
    /// Create a disconnected session over the given transport
    pub fn new(transport: T) -> Self {
        Self {
            id: SessionId::new(),
            transport,
            identity: None,
            state: ConnectionState::Disconnected,
            history: Vec::new(),
            inbound: None,
            last_validation_error: None,
        }
    }

    /// Join the chat with the given nickname and gender
    ///
    /// Validates the identity, connects the transport and announces the
    /// join with a system message. On a validation failure the error is
    /// also stored for [`Session::last_validation_error`] and nothing
    /// else changes. Joining while already connected is rejected.
    pub async fn join(&mut self, nickname: &str, gender: Option<Gender>) -> Result<(), SessionError> {
        if self.state == ConnectionState::Connected {
            return Err(SessionError::AlreadyConnected);
        }

        let identity = match Identity::validate(nickname, gender) {
            Ok(identity) => identity,
            Err(e) => {
                debug!("Session {} join rejected: {}", self.id, e);
                self.last_validation_error = Some(e.clone());
                return Err(e.into());
            }
        };

        let inbound = self.transport.connect().await?;

        let announce = Message::system_connected(identity.nickname());
        if let Err(e) = self.transport.send(&announce).await {
            // Announce failed: tear the half-open connection down and
            // stay disconnected
            self.transport.disconnect().await;
            return Err(e.into());
        }
        if !self.transport.echoes() {
            self.history.push(announce);
        }

        info!("Session {} joined as '{}'", self.id, identity.nickname());

        self.inbound = Some(inbound);
        self.identity = Some(identity);
        self.state = ConnectionState::Connected;
        self.last_validation_error = None;
        Ok(())
    }

    /// Send a chat message tagged with the session's identity
    ///
    /// Rejected while disconnected, for empty text and for text over
    /// 1000 characters; a rejected send leaves history untouched.
    pub async fn send(&mut self, text: &str) -> Result<(), SessionError> {
        if self.state != ConnectionState::Connected {
            return Err(SessionError::NotConnected);
        }
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let length = text.chars().count();
        if length > MESSAGE_MAX_LEN {
            return Err(SessionError::MessageTooLong { length });
        }
        let Some(identity) = self.identity.as_ref() else {
            return Err(SessionError::NotConnected);
        };

        let message = Message::from_participant(identity, text.to_string());
        self.transport.send(&message).await?;
        if !self.transport.echoes() {
            self.history.push(message);
        }
        Ok(())
    }

    /// Leave the chat
    ///
    /// Announces the departure with a system message, then disconnects.
    /// Identity and history are kept. A no-op when already disconnected,
    /// so calling it twice announces only once.
    pub async fn leave(&mut self) -> Result<(), SessionError> {
        if self.state == ConnectionState::Disconnected {
            return Ok(());
        }
        let Some(identity) = self.identity.as_ref() else {
            return Err(SessionError::NotConnected);
        };

        let farewell = Message::system_disconnected(identity.nickname());
        self.transport.send(&farewell).await?;
        if !self.transport.echoes() {
            self.history.push(farewell);
        }

        self.transport.disconnect().await;
        self.inbound = None;
        self.state = ConnectionState::Disconnected;

        info!("Session {} left the chat", self.id);
        Ok(())
    }

    /// Await the next inbound message and append it to history
    ///
    /// Returns a copy of the appended message, or `None` when the
    /// session is disconnected or the transport closed the inbound
    /// channel. Messages are appended in delivery order.
    pub async fn recv(&mut self) -> Option<Message> {
        let inbound = self.inbound.as_mut()?;
        let message = inbound.recv().await?;
        self.history.push(message.clone());
        Some(message)
    }

    /// Session identifier used in log output
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The identity set by the last successful join, if any
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The message history, in transport order
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The error from the last rejected join, cleared on success
    pub fn last_validation_error(&self) -> Option<&IdentityError> {
        self.last_validation_error.as_ref()
    }

    /// Classify a message against the session's current identity
    pub fn classify<'a>(&self, message: &'a Message) -> ClassifiedMessage<'a> {
        classify(message, self.identity.as_ref().map(|i| i.nickname()))
    }

    /// The history with each entry classified against the current identity
    ///
    /// Derived at call time, so an identity revision between connections
    /// reclassifies older entries too.
    pub fn classified_history(&self) -> Vec<ClassifiedMessage<'_>> {
        let local = self.identity.as_ref().map(|i| i.nickname());
        self.history.iter().map(|m| classify(m, local)).collect()
    }
}
