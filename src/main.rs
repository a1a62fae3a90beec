//! Chat Session - Demo Client Entry Point
//!
//! Joins a WebSocket chat relay and pumps stdin lines and inbound
//! messages through one session, printing classified entries as plain
//! text. All rendering beyond that stays out of the library.

use std::env;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chat_session::{Category, EventKind, Gender, Message, Session, Transport, WsTransport};

/// Default relay address
const DEFAULT_URL: &str = "ws://127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chat_session=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chat_session=info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let (Some(nickname), Some(gender)) = (args.next(), args.next()) else {
        eprintln!("Usage: chat_session <nickname> <male|female> [ws-url]");
        std::process::exit(2);
    };
    let gender = match gender.parse::<Gender>() {
        Ok(gender) => gender,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let url = args.next().unwrap_or_else(|| DEFAULT_URL.to_string());

    let mut session = Session::new(WsTransport::new(url.clone()));

    if let Err(e) = session.join(&nickname, Some(gender)).await {
        error!("Failed to join: {}", e);
        std::process::exit(1);
    }
    info!("Connected to {} as '{}'", url, nickname);
    println!("Type a message and press enter; /quit to leave.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            inbound = session.recv() => {
                match inbound {
                    Some(message) => print_message(&session, &message),
                    None => {
                        info!("Connection closed by server");
                        break;
                    }
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) if line.trim() == "/quit" => break,
                    Some(line) => {
                        let text = line.trim();
                        if text.is_empty() {
                            continue;
                        }
                        if let Err(e) = session.send(text).await {
                            eprintln!("{}", e);
                        }
                    }
                    // stdin closed
                    None => break,
                }
            }
        }
    }

    session.leave().await?;
    Ok(())
}

/// Print one message with a marker derived from its classification
fn print_message<T: Transport>(session: &Session<T>, message: &Message) {
    let classified = session.classify(message);
    match (classified.category, classified.event) {
        (Category::System, EventKind::Connect) => println!("--> {}", message.text),
        (Category::System, EventKind::Disconnect) => println!("<-- {}", message.text),
        (Category::System, EventKind::Plain) => println!("*** {}", message.text),
        (Category::Own, _) => println!("you: {}", message.text),
        (Category::Other, _) => println!("{}: {}", message.nickname, message.text),
    }
}
