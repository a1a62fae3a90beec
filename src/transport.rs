//! Transport collaborator
//!
//! The session controller treats the connection as an abstract
//! bidirectional service: [`Transport`]. Inbound messages arrive over an
//! mpsc receiver returned by `connect`, which preserves the FIFO order of
//! the underlying connection.
//!
//! Two implementations:
//! - [`WsTransport`]: a WebSocket client over tokio-tungstenite,
//!   exchanging JSON text frames with a broadcast chat relay
//! - [`ChannelTransport`]: an in-process transport for tests and local
//!   demos, with a [`ChannelHandle`] to play the remote side

use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, warn};

use crate::error::TransportError;
use crate::message::Message;

/// Buffer size of the inbound message channel
const INBOUND_BUFFER_SIZE: usize = 32;

/// Bidirectional message transport consumed by the session controller
///
/// After `connect` returns, inbound messages may arrive on the receiver
/// at any time, in the order the connection delivered them, including
/// this participant's own sends when the transport echoes.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Open the connection and return the inbound message channel
    async fn connect(&mut self) -> Result<mpsc::Receiver<Message>, TransportError>;

    /// Best-effort publish of a message; no delivery confirmation
    async fn send(&mut self, message: &Message) -> Result<(), TransportError>;

    /// Tear down the connection
    ///
    /// No further inbound messages are guaranteed after this returns.
    async fn disconnect(&mut self);

    /// Whether sent messages come back through the inbound channel
    ///
    /// A broadcast relay echoes the sender's own messages; the session
    /// controller appends local copies only when this is false.
    fn echoes(&self) -> bool {
        true
    }
}

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, WsMessage>;

/// WebSocket transport
///
/// Connects to a chat relay that broadcasts every JSON text frame to all
/// connected participants, the sender included.
pub struct WsTransport {
    url: String,
    outbound: Option<WsSink>,
    reader: Option<JoinHandle<()>>,
}

impl WsTransport {
    /// Create a transport for the given WebSocket URL (ws:// or wss://)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outbound: None,
            reader: None,
        }
    }
}

impl Transport for WsTransport {
    async fn connect(&mut self) -> Result<mpsc::Receiver<Message>, TransportError> {
        let (ws_stream, _) = connect_async(self.url.as_str()).await?;
        debug!("WebSocket connected to {}", self.url);

        let (ws_sender, mut ws_receiver) = ws_stream.split();
        self.outbound = Some(ws_sender);

        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_BUFFER_SIZE);

        // Read task: WebSocket frames -> inbound channel, in frame order
        self.reader = Some(tokio::spawn(async move {
            while let Some(msg_result) = ws_receiver.next().await {
                match msg_result {
                    Ok(WsMessage::Text(text)) => match serde_json::from_str::<Message>(&text) {
                        Ok(message) => {
                            if inbound_tx.send(message).await.is_err() {
                                debug!("Inbound receiver dropped, ending read task");
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("Invalid message frame: {}", e);
                        }
                    },
                    Ok(WsMessage::Close(_)) => {
                        debug!("Server sent close frame");
                        break;
                    }
                    Ok(_) => {
                        // Ping/pong handled by tungstenite, binary ignored
                    }
                    Err(e) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
            debug!("Read task ended");
        }));

        Ok(inbound_rx)
    }

    async fn send(&mut self, message: &Message) -> Result<(), TransportError> {
        let Some(outbound) = self.outbound.as_mut() else {
            return Err(TransportError::Closed);
        };

        let json = serde_json::to_string(message)?;
        outbound.send(WsMessage::Text(json.into())).await?;
        Ok(())
    }

    async fn disconnect(&mut self) {
        if let Some(mut outbound) = self.outbound.take() {
            let _ = outbound.close().await;
        }
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

/// In-process transport backed by an mpsc channel
///
/// Echoes sent messages back through the inbound channel like a broadcast
/// relay would; [`ChannelTransport::without_echo`] builds one that does
/// not. The paired [`ChannelHandle`] injects messages from simulated
/// remote participants and records everything sent.
pub struct ChannelTransport {
    echo: bool,
    inbound_tx: Arc<Mutex<Option<mpsc::Sender<Message>>>>,
    sent: Arc<Mutex<Vec<Message>>>,
}

/// Remote side of a [`ChannelTransport`]
#[derive(Clone)]
pub struct ChannelHandle {
    inbound_tx: Arc<Mutex<Option<mpsc::Sender<Message>>>>,
    sent: Arc<Mutex<Vec<Message>>>,
}

impl ChannelTransport {
    /// Create an echoing transport and its remote handle
    pub fn new() -> (Self, ChannelHandle) {
        Self::with_echo(true)
    }

    /// Create a non-echoing transport and its remote handle
    pub fn without_echo() -> (Self, ChannelHandle) {
        Self::with_echo(false)
    }

    fn with_echo(echo: bool) -> (Self, ChannelHandle) {
        let inbound_tx = Arc::new(Mutex::new(None));
        let sent = Arc::new(Mutex::new(Vec::new()));
        let handle = ChannelHandle {
            inbound_tx: Arc::clone(&inbound_tx),
            sent: Arc::clone(&sent),
        };
        (
            Self {
                echo,
                inbound_tx,
                sent,
            },
            handle,
        )
    }
}

impl Transport for ChannelTransport {
    async fn connect(&mut self) -> Result<mpsc::Receiver<Message>, TransportError> {
        let (tx, rx) = mpsc::channel(INBOUND_BUFFER_SIZE);
        *self.inbound_tx.lock().await = Some(tx);
        Ok(rx)
    }

    async fn send(&mut self, message: &Message) -> Result<(), TransportError> {
        let tx = self.inbound_tx.lock().await.clone();
        let Some(tx) = tx else {
            return Err(TransportError::Closed);
        };

        self.sent.lock().await.push(message.clone());

        if self.echo {
            tx.send(message.clone()).await.map_err(|_| TransportError::Closed)?;
        }
        Ok(())
    }

    async fn disconnect(&mut self) {
        // Dropping the sender closes the inbound channel
        self.inbound_tx.lock().await.take();
    }

    fn echoes(&self) -> bool {
        self.echo
    }
}

impl ChannelHandle {
    /// Deliver a message as if a remote participant had sent it
    ///
    /// Returns false when the transport is not connected.
    pub async fn deliver(&self, message: Message) -> bool {
        let tx = self.inbound_tx.lock().await.clone();
        match tx {
            Some(tx) => tx.send(message).await.is_ok(),
            None => false,
        }
    }

    /// Everything sent through the transport so far, in send order
    pub async fn sent(&self) -> Vec<Message> {
        self.sent.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_transport_echoes_sends() {
        let (mut transport, handle) = ChannelTransport::new();
        let mut inbound = transport.connect().await.unwrap();

        let msg = Message::system_connected("Alice");
        transport.send(&msg).await.unwrap();

        assert_eq!(inbound.recv().await.unwrap(), msg);
        assert_eq!(handle.sent().await, vec![msg]);
    }

    #[tokio::test]
    async fn test_channel_transport_without_echo() {
        let (mut transport, handle) = ChannelTransport::without_echo();
        let mut inbound = transport.connect().await.unwrap();

        assert!(!transport.echoes());
        transport.send(&Message::system_connected("Alice")).await.unwrap();

        // Nothing echoed, but the send was recorded
        assert!(inbound.try_recv().is_err());
        assert_eq!(handle.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn test_channel_transport_send_before_connect() {
        let (mut transport, _handle) = ChannelTransport::new();
        let result = transport.send(&Message::system_connected("Alice")).await;

        assert!(matches!(result, Err(TransportError::Closed)));
    }

    #[tokio::test]
    async fn test_channel_transport_disconnect_closes_inbound() {
        let (mut transport, handle) = ChannelTransport::new();
        let mut inbound = transport.connect().await.unwrap();

        transport.disconnect().await;

        assert_eq!(inbound.recv().await, None);
        assert!(!handle.deliver(Message::system_connected("Bob")).await);
    }

    #[tokio::test]
    async fn test_handle_delivers_in_order() {
        let (mut transport, handle) = ChannelTransport::new();
        let mut inbound = transport.connect().await.unwrap();

        assert!(handle.deliver(Message::system_connected("Bob")).await);
        assert!(handle.deliver(Message::system_disconnected("Bob")).await);

        assert_eq!(inbound.recv().await.unwrap().text, "Bob has connected to the chat");
        assert_eq!(
            inbound.recv().await.unwrap().text,
            "Bob has disconnected from the chat"
        );
    }
}
