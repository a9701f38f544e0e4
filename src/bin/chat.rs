//! Terminal front end for a chat session: prints the transcript and sends
//! each typed line to the relay.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use chat_relay::{
    config::ClientConfig,
    services::{
        chat_session::{ChatMessage, ChatSession, Sender},
        relay_client::RelayClient,
    },
    telemetry,
};

const HELP: &str = "commands: /open  /close  /history  /quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing()?;

    let config = ClientConfig::parse();
    let relay = config.relay_client()?;
    tracing::info!(endpoint = relay.endpoint(), "chat client ready");

    let session = ChatSession::new(relay);
    session.open().await;
    println!("{HELP}");
    render_all(&session).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let open = session.is_open().await;
        match line.trim() {
            "/quit" => break,
            "/open" => {
                session.open().await;
                render_all(&session).await;
            }
            "/close" => {
                session.close().await;
                println!("(chat closed, /open to resume)");
            }
            "/history" => render_all(&session).await,
            _ if !open => println!("(chat closed, /open to resume)"),
            _ => {
                session.set_pending_input(line.clone()).await;
                if let Some(reply) = session.submit_pending().await {
                    render(&reply);
                }
            }
        }
    }
    Ok(())
}

async fn render_all(session: &ChatSession<RelayClient>) {
    for msg in session.transcript().await {
        render(&msg);
    }
}

fn render(msg: &ChatMessage) {
    let who = match msg.sender {
        Sender::User => "you",
        Sender::Bot => "Ava",
    };
    println!("{who:>4} | {}", msg.text);
}
