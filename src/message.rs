// src/message.rs
use serde::{Deserialize, Serialize};

/// Body of `POST <relay-path>`.
///
/// `message` is optional on the wire so a body without it still reaches the
/// reply policy instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RelayRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayReply {
    pub reply: String,
}
