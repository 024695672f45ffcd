//! TUI-less "say" command

use std::error::Error;

use crate::core::chat_client::ChatClient;
use crate::core::config::ChatSettings;
use crate::core::message::Transcript;

/// Sends `prompt` as a single turn. On success the reply goes to stdout; a
/// failed turn prints its assistant text to stderr and exits with status 1.
pub async fn run_say(settings: &ChatSettings, prompt: Vec<String>) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: relaychat say <prompt>");
        std::process::exit(1);
    }

    let client = ChatClient::new(settings)?;
    let mut transcript = Transcript::new();

    match client.send_turn(&mut transcript, &prompt).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {}", err.turn_text());
            std::process::exit(1);
        }
    }
}
