//! Real-Time Chat Session Controller Library
//!
//! Governs how a single participant joins, exchanges and leaves a shared
//! conversation over a persistent connection: identity validation,
//! connection lifecycle, system-event injection, message ordering and
//! classification of messages relative to the local participant.
//!
//! # Features
//! - Nickname/gender validation with ordered, user-facing errors
//! - Connect/disconnect system-message injection
//! - Append-only message history in transport order
//! - Read-time message classification (system / own / other)
//! - Pluggable transport (WebSocket client or in-process channel)
//!
//! # Architecture
//! The [`Session`] controller owns all session state and is driven from a
//! single task. Inbound delivery is modeled as an `mpsc` channel returned
//! by the [`Transport`] on connect, preserving FIFO order per connection;
//! no locks guard the history because every entry point is `&mut self`.
//!
//! # Example
//! ```ignore
//! use chat_session::{Gender, Session, WsTransport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = WsTransport::new("ws://127.0.0.1:8080");
//!     let mut session = Session::new(transport);
//!
//!     session.join("Alice", Some(Gender::Female)).await.unwrap();
//!     session.send("hello").await.unwrap();
//!
//!     while let Some(message) = session.recv().await {
//!         println!("{}: {}", message.nickname, message.text);
//!     }
//! }
//! ```

pub mod classify;
pub mod error;
pub mod identity;
pub mod message;
pub mod session;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use classify::{classify, Category, ClassifiedMessage, EventKind};
pub use error::{IdentityError, SessionError, TransportError};
pub use identity::Identity;
pub use message::Message;
pub use session::{ConnectionState, Session};
pub use transport::{ChannelHandle, ChannelTransport, Transport, WsTransport};
pub use types::{Gender, MessageGender, SessionId};
