//! Session state for one interactive chat.
//!
//! [`App`] is owned by the chat loop and passed explicitly to the renderer,
//! the slash commands, and the turn operation. Nothing here lives in globals.

pub mod ui_state;

pub use ui_state::{Banner, BannerKind, UiState};

use crate::core::chat_client::{ChatClient, TurnError};
use crate::core::message::Transcript;
use crate::utils::logging::LoggingState;

pub struct App {
    pub transcript: Transcript,
    pub client: ChatClient,
    pub ui: UiState,
    pub logging: LoggingState,
    pub base_url: String,
}

impl App {
    pub fn new(
        client: ChatClient,
        base_url: impl Into<String>,
        markdown_enabled: bool,
        logging: LoggingState,
    ) -> Self {
        Self {
            transcript: Transcript::new(),
            client,
            ui: UiState::new(markdown_enabled),
            logging,
            base_url: base_url.into(),
        }
    }

    /// Marks `prompt` as in flight so the next frame shows it before the
    /// reply arrives.
    pub fn begin_turn(&mut self, prompt: &str) {
        self.ui.clear_banner();
        self.ui.begin_waiting(prompt);
    }

    /// Sends `prompt` and records the exchange. A failed turn leaves its
    /// error turn in the transcript and an error banner on screen.
    pub async fn complete_turn(&mut self, prompt: &str) -> Result<String, TurnError> {
        let result = self.client.send_turn(&mut self.transcript, prompt).await;
        self.ui.end_waiting();
        self.log_latest_exchange();

        if let Err(err) = &result {
            self.ui.set_error(err.banner_text());
        }
        result
    }

    fn log_latest_exchange(&mut self) {
        let skip = self.transcript.len().saturating_sub(2);
        for message in self.transcript.iter().skip(skip) {
            if let Err(err) = self.logging.log_turn(message) {
                self.ui.set_error(format!("Log error: {err}"));
                return;
            }
        }
    }

    pub fn title(&self) -> String {
        format!(
            "Remote AI Chat - {} ({} history) • Logging: {}",
            self.client.model(),
            self.client.history(),
            self.logging.get_status_string()
        )
    }

    pub fn caption(&self) -> String {
        format!("Connected to: {}", self.base_url)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::config::{ChatSettings, EndpointSettings};
    use crate::core::message::HistoryMode;
    use std::time::Duration;

    pub fn create_test_app(base_url: &str) -> App {
        let settings = ChatSettings {
            endpoint: EndpointSettings {
                base_url: base_url.to_string(),
                credential: String::new(),
            },
            model: "test-model".to_string(),
            timeout: Duration::from_secs(2),
            history: HistoryMode::Full,
            attach_credential: true,
            markdown: true,
        };
        let client = ChatClient::new(&settings).expect("client should build");
        App::new(
            client,
            base_url,
            true,
            LoggingState::new(None).expect("logging state"),
        )
    }
}
