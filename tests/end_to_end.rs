use chat_relay::config::DEFAULT_RELAY_PATH;
use chat_relay::routes::create_router;
use chat_relay::services::chat_session::{CONNECTION_ERROR, ChatSession, Sender};
use chat_relay::services::relay_client::RelayClient;
use chat_relay::services::reply_policy::ReplyPolicy;
use chat_relay::state::AppState;

use axum::{Router, http::StatusCode, routing::post};
use std::sync::Arc;
use std::time::Duration;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn serve_relay(policy: ReplyPolicy) -> String {
    let app = create_router(DEFAULT_RELAY_PATH, None).with_state(Arc::new(AppState::new(policy)));
    let base = serve(app).await;
    format!("{base}{DEFAULT_RELAY_PATH}")
}

fn relay_client(url: &str) -> RelayClient {
    RelayClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_hello_round_trip() {
    let url = serve_relay(ReplyPolicy::Echo).await;
    let session = ChatSession::new(relay_client(&url));

    session.submit("hello").await;

    let transcript = session.transcript().await;
    assert_eq!(transcript.len(), 3);
    let last = transcript.last().unwrap();
    assert_eq!(last.sender, Sender::Bot);
    assert_eq!(last.text, "Echo: hello");
}

#[tokio::test]
async fn test_forward_policy_chains_to_upstream() {
    let upstream = serve_relay(ReplyPolicy::Echo).await;
    let front = serve_relay(ReplyPolicy::Forward(relay_client(&upstream))).await;
    let session = ChatSession::new(relay_client(&front));

    let reply = session.submit("hello").await.unwrap();
    assert_eq!(reply.text, "Echo: hello");
}

#[tokio::test]
async fn test_failing_upstream_surfaces_as_error_turn() {
    let broken = serve(Router::new().route(
        DEFAULT_RELAY_PATH,
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;
    let front = serve_relay(ReplyPolicy::Forward(relay_client(&format!(
        "{broken}{DEFAULT_RELAY_PATH}"
    ))))
    .await;

    let response = reqwest::Client::new()
        .post(&front)
        .json(&serde_json::json!({"message": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let session = ChatSession::new(relay_client(&front));
    let reply = session.submit("hello").await.unwrap();
    assert_eq!(reply.text, CONNECTION_ERROR);
}

#[tokio::test]
async fn test_upstream_without_reply_is_bad_gateway() {
    let silent = serve(Router::new().route(
        DEFAULT_RELAY_PATH,
        post(|| async { axum::Json(serde_json::json!({"status": "queued"})) }),
    ))
    .await;
    let front = serve_relay(ReplyPolicy::Forward(relay_client(&format!(
        "{silent}{DEFAULT_RELAY_PATH}"
    ))))
    .await;

    let response = reqwest::Client::new()
        .post(&front)
        .json(&serde_json::json!({"message": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_relay_down_surfaces_as_error_turn() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = ChatSession::new(relay_client(&format!("http://{addr}{DEFAULT_RELAY_PATH}")));
    let reply = session.submit("hello").await.unwrap();

    assert_eq!(reply.sender, Sender::Bot);
    assert_eq!(reply.text, CONNECTION_ERROR);
    assert_eq!(session.len().await, 3);
}
