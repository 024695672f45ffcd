//! The request/reply cycle against the remote chat endpoint.
//!
//! [`ChatClient::send_turn`] records the user turn, posts the conversation,
//! and records exactly one assistant turn: the reply on success, or a
//! synthetic turn describing the failure. Failures are local to the turn;
//! the transcript stays usable for the next one.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::api::{extract_error_summary, extract_reply_content, ChatRequest};
use crate::core::config::ChatSettings;
use crate::core::message::{HistoryMode, Transcript};
use crate::utils::url::construct_api_url;

/// Path appended to the configured base address.
pub const CHAT_ENDPOINT_PATH: &str = "api/v1/chat";

/// Why a turn did not produce a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// Connection refused, DNS failure, timeout, or a non-2xx status.
    Transport { detail: String },
    /// Anything else: an unreadable body, invalid JSON, a reply whose
    /// `choices` cannot be indexed.
    Unknown { detail: String },
}

impl TurnError {
    pub fn detail(&self) -> &str {
        match self {
            TurnError::Transport { detail } | TurnError::Unknown { detail } => detail,
        }
    }

    /// Content of the synthetic assistant turn recorded for this failure.
    pub fn turn_text(&self) -> String {
        match self {
            TurnError::Transport { detail } => format!(
                "Connection Error: Please ensure the endpoint is reachable. Details: {detail}"
            ),
            TurnError::Unknown { detail } => format!("Unknown error: {detail}"),
        }
    }

    /// Text for the error banner shown above the input.
    pub fn banner_text(&self) -> String {
        match self {
            TurnError::Transport { .. } => self.turn_text(),
            TurnError::Unknown { detail } => format!("An unknown error occurred: {detail}"),
        }
    }

    fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        let mut detail = if err.is_timeout() {
            format!("request timed out after {timeout:?}: {err}")
        } else {
            err.to_string()
        };
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !detail.contains(&text) {
                detail.push_str(": ");
                detail.push_str(&text);
            }
            source = cause.source();
        }
        TurnError::Transport { detail }
    }

    fn from_status(status: StatusCode, body: &str) -> Self {
        let summary = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| extract_error_summary(&value))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| truncate(trimmed, 200))
            });
        let detail = match summary {
            Some(summary) => format!("HTTP status {status}: {summary}"),
            None => format!("HTTP status {status}"),
        };
        TurnError::Transport { detail }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}…", &text[..index]),
        None => text.to_string(),
    }
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::Transport { detail } => write!(f, "connection error: {detail}"),
            TurnError::Unknown { detail } => write!(f, "unknown error: {detail}"),
        }
    }
}

impl StdError for TurnError {}

/// Sends turns to one endpoint with one fixed model.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    url: String,
    credential: Option<String>,
    model: String,
    history: HistoryMode,
    timeout: Duration,
}

impl ChatClient {
    pub fn new(settings: &ChatSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        let credential = (settings.attach_credential && settings.endpoint.has_credential())
            .then(|| settings.endpoint.credential.clone());
        Ok(Self {
            client,
            url: construct_api_url(&settings.endpoint.base_url, CHAT_ENDPOINT_PATH),
            credential,
            model: settings.model.clone(),
            history: settings.history,
            timeout: settings.timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn history(&self) -> HistoryMode {
        self.history
    }

    pub fn sends_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Runs one interaction cycle.
    ///
    /// Appends the user turn, then exactly one assistant turn. On failure the
    /// assistant turn holds [`TurnError::turn_text`] and the error is returned
    /// for the caller to surface.
    pub async fn send_turn(
        &self,
        transcript: &mut Transcript,
        text: &str,
    ) -> Result<String, TurnError> {
        transcript.push_user(text);
        let request = ChatRequest::new(&self.model, transcript.api_messages(self.history));

        match self.exchange(&request).await {
            Ok(content) => {
                transcript.push_assistant(content.clone());
                Ok(content)
            }
            Err(err) => {
                warn!(url = %self.url, error = %err, "chat turn failed");
                transcript.push_assistant(err.turn_text());
                Err(err)
            }
        }
    }

    async fn exchange(&self, request: &ChatRequest) -> Result<String, TurnError> {
        debug!(
            url = %self.url,
            model = %request.model,
            messages = request.messages.len(),
            credential = self.credential.is_some(),
            "sending chat request"
        );

        let mut http_request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(credential) = &self.credential {
            http_request = http_request.bearer_auth(credential);
        }

        let response = http_request
            .json(request)
            .send()
            .await
            .map_err(|err| TurnError::from_reqwest(&err, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TurnError::from_status(status, &body));
        }

        let bytes = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                TurnError::from_reqwest(&err, self.timeout)
            } else {
                TurnError::Unknown {
                    detail: format!("failed to read reply body: {err}"),
                }
            }
        })?;
        debug!(status = %status, bytes = bytes.len(), "received chat reply");

        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|err| TurnError::Unknown {
                detail: format!("reply is not valid JSON: {err}"),
            })?;
        extract_reply_content(&body).map_err(|err| TurnError::Unknown {
            detail: err.to_string(),
        })
    }
}
