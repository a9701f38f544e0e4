// src/services/reply_policy.rs
use crate::{
    error::{AppError, RelayError},
    services::relay_client::{Relay, RelayClient},
};

pub const ECHO_PREFIX: &str = "Echo: ";

/// Stands in for a request body that has no `message` field.
pub const MISSING_MESSAGE: &str = "undefined";

/// How the relay turns a user message into a reply.
#[derive(Debug, Clone)]
pub enum ReplyPolicy {
    /// Reference behavior: the message prefixed with [`ECHO_PREFIX`].
    Echo,
    /// Hand the message to an upstream automation webhook speaking the same
    /// wire contract and pass its reply through.
    Forward(RelayClient),
}

impl ReplyPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            ReplyPolicy::Echo => "echo",
            ReplyPolicy::Forward(_) => "forward",
        }
    }

    pub async fn generate_reply(&self, message: &str) -> Result<String, AppError> {
        match self {
            ReplyPolicy::Echo => Ok(echo(message)),
            ReplyPolicy::Forward(upstream) => {
                let reply = upstream
                    .send(message)
                    .await?
                    .ok_or(RelayError::MissingReply)?;
                Ok(reply)
            }
        }
    }
}

pub fn echo(message: &str) -> String {
    format!("{ECHO_PREFIX}{message}")
}
