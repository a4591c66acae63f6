//! HTTP client for the remote transcription provider.
//!
//! One `reqwest::Client` (connection pool + per-request timeout) is built at
//! startup and shared across all workers via `Arc<dyn Transcriber>`: the
//! provider handle is explicit process-scoped state, never an ambient global.

use crate::asr::transcriber::{Outcome, Transcriber};
use crate::defaults;
use crate::error::{Result, VoxbatchError};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

/// Successful provider response body for `POST /asr`.
#[derive(Debug, Clone, Deserialize)]
pub struct AsrResponse {
    /// Transcribed text, exactly as the provider produced it.
    pub transcription: String,
    /// Audio length in seconds, formatted by the provider to one decimal.
    pub duration: Option<String>,
}

/// Provider response body for `GET /ping`.
#[derive(Debug, Deserialize)]
struct PingResponse {
    message: String,
}

/// Connection settings for the HTTP transcriber.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider (routes are appended to this).
    pub endpoint: String,
    /// Per-request timeout; bounds worst-case latency of a single item.
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::ENDPOINT.to_string(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
        }
    }
}

/// reqwest-backed [`Transcriber`] talking to the provider's `/asr` route.
pub struct HttpTranscriber {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranscriber {
    /// Builds the client with the configured per-request timeout.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VoxbatchError::ProviderClient {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Checks provider liveness via `GET /ping`.
    ///
    /// Expects `{"message": "pong"}`; anything else is reported as a
    /// liveness failure.
    pub async fn ping(&self) -> Result<()> {
        let url = format!("{}{}", self.endpoint, defaults::PING_ROUTE);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VoxbatchError::ProviderPing {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(VoxbatchError::ProviderPing {
                message: format!("HTTP {}", response.status()),
            });
        }

        let body: PingResponse =
            response
                .json()
                .await
                .map_err(|e| VoxbatchError::ProviderPing {
                    message: format!("malformed reply: {e}"),
                })?;
        if body.message != "pong" {
            return Err(VoxbatchError::ProviderPing {
                message: format!("unexpected reply: {}", body.message),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    /// One `POST /asr` multipart request; exactly one attempt, no retry.
    ///
    /// Every I/O failure category maps to `Outcome::Failed`: connect errors
    /// and timeouts, any non-200 status (the body is unspecified there and
    /// never parsed), and 200 responses whose body is not the expected JSON.
    async fn transcribe(&self, audio: Vec<u8>) -> Outcome {
        let url = format!("{}{}", self.endpoint, defaults::ASR_ROUTE);
        let part = Part::bytes(audio).file_name("audio");
        let form = Form::new().part("file", part);

        let response = match self.client.post(&url).multipart(form).send().await {
            Ok(r) => r,
            Err(e) => {
                return Outcome::Failed {
                    reason: format!("request failed: {e}"),
                };
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Outcome::Failed {
                reason: format!("provider returned HTTP {status}"),
            };
        }

        match response.json::<AsrResponse>().await {
            Ok(body) => Outcome::Transcribed {
                text: body.transcription,
            },
            Err(e) => Outcome::Failed {
                reason: format!("malformed provider response: {e}"),
            },
        }
    }

    fn provider_name(&self) -> &str {
        &self.endpoint
    }
}
