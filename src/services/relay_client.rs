// src/services/relay_client.rs
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{error::RelayError, message::RelayRequest};

/// One request/response exchange with a relay endpoint.
///
/// `Ok(None)` means the endpoint answered 2xx with a JSON body that carries
/// no usable `reply`; callers decide what to show instead.
pub trait Relay: Send + Sync {
    fn send(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<Option<String>, RelayError>> + Send;
}

#[derive(Deserialize)]
struct ReplyEnvelope {
    #[serde(default)]
    reply: Option<String>,
}

/// HTTP client for the relay wire contract.
#[derive(Clone, Debug)]
pub struct RelayClient {
    client: Client,
    endpoint: Url,
}

impl RelayClient {
    /// Fails only on local setup problems: an endpoint that is not an
    /// absolute http(s) URL, or an HTTP client that cannot be built.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RelayError> {
        let endpoint = Url::parse(endpoint)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| RelayError::InvalidEndpoint(endpoint.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RelayError::ClientSetup)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

impl Relay for RelayClient {
    async fn send(&self, message: &str) -> Result<Option<String>, RelayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&RelayRequest::new(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status));
        }

        let body = response.text().await?;
        let envelope: ReplyEnvelope = serde_json::from_str(&body)?;
        // An empty reply would render as a blank bubble.
        Ok(envelope.reply.filter(|r| !r.is_empty()))
    }
}
