//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, resolves session settings and
//! dispatches to the chat UI or one of the maintenance subcommands.

pub mod auth;
pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::cli::auth::{run_auth, run_deauth};
use crate::cli::say::run_say;
use crate::core::app::App;
use crate::core::chat_client::ChatClient;
use crate::core::config::{ChatSettings, Config, ConfigError, EndpointSettings, SettingsOverrides};
use crate::core::keyring::{load_credential, KeyringAccessError};
use crate::core::message::HistoryMode;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::LoggingState;
use crate::utils::trace::{init_tracing, TraceTarget};

/// Exit status for a configuration problem detected before startup.
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "relaychat", version)]
#[command(about = "A terminal chat front-end for a remote chat endpoint")]
#[command(
    long_about = "relaychat is a full-screen terminal chat interface that relays each turn \
to a remote chat endpoint and shows the reply.\n\n\
Environment Variables:\n\
  OPEN_WEBUI_TUNNEL_URL  Base address of the chat endpoint (required)\n\
  OPEN_WEBUI_API_KEY     Bearer credential (optional; falls back to 'relaychat auth')\n\
  RELAYCHAT_LOG          tracing filter directives (default: warn)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line\n\
  Up/Down/PgUp/PgDn Scroll through the conversation\n\
  Ctrl+C / Ctrl+D   Quit the application\n\n\
Commands:\n\
  /help             Show commands and key bindings\n\
  /log <filename>   Enable logging to specified file\n\
  /log              Toggle logging pause/resume\n\
  /dump [filename]  Write the conversation to a file"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model name sent with every request
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Conversation context sent per turn: full or latest
    #[arg(long, global = true, value_name = "MODE")]
    pub history: Option<HistoryMode>,

    /// Never send the Authorization header
    #[arg(long, global = true)]
    pub no_credential: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, global = true, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Write diagnostic traces to this file instead of the cache directory
    #[arg(long, global = true, value_name = "FILE")]
    pub trace_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single message and print the reply
    Say {
        /// Message text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set a preference, or list all preferences when no value is given
    Set {
        /// Preference key (model, timeout, history, attach-credential, markdown)
        key: Option<String>,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Restore a preference to its default
    Unset {
        /// Preference key to unset
        key: String,
    },
    /// Store a bearer credential in the system keyring
    Auth,
    /// Remove the stored bearer credential
    Deauth,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            model: self.model.clone(),
            history: self.history,
            timeout_secs: self.timeout,
            no_credential: self.no_credential,
        }
    }
}

/// Falls back to the keyring when the environment carries no credential.
/// Keyring failures only cost the credential, never the session.
pub fn apply_keyring_fallback<F>(mut endpoint: EndpointSettings, load: F) -> EndpointSettings
where
    F: FnOnce() -> Result<Option<String>, KeyringAccessError>,
{
    if endpoint.has_credential() {
        return endpoint;
    }
    match load() {
        Ok(Some(token)) => endpoint.credential = token.trim().to_string(),
        Ok(None) => {}
        Err(err) => warn!(error = %err, "could not read credential from keyring"),
    }
    endpoint
}

fn resolve_settings(args: &Args) -> Result<ChatSettings, Box<dyn Error>> {
    let endpoint = match EndpointSettings::from_env() {
        Ok(endpoint) => endpoint,
        Err(err @ ConfigError::MissingBaseUrl { .. }) => {
            eprintln!("❌ {err}");
            std::process::exit(EXIT_CONFIG_ERROR);
        }
        Err(err) => return Err(err.into()),
    };
    let endpoint = apply_keyring_fallback(endpoint, load_credential);
    let config = Config::load()?;
    Ok(ChatSettings::resolve(endpoint, &config, &args.overrides()))
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command.clone().unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let settings = resolve_settings(&args)?;
            let target = args
                .trace_file
                .clone()
                .map(TraceTarget::File)
                .unwrap_or_else(TraceTarget::default_file);
            init_tracing(target)?;

            let client = ChatClient::new(&settings)?;
            let logging = LoggingState::new(args.log.clone())?;
            let app = App::new(
                client,
                settings.endpoint.base_url.clone(),
                settings.markdown,
                logging,
            );
            run_chat(app).await
        }
        Commands::Say { prompt } => {
            let settings = resolve_settings(&args)?;
            let target = args
                .trace_file
                .clone()
                .map(TraceTarget::File)
                .unwrap_or(TraceTarget::Stderr);
            init_tracing(target)?;
            run_say(&settings, prompt).await
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            match key {
                Some(key) if !value.is_empty() => {
                    match config.set_value(&key, &value.join(" ")) {
                        Ok(message) => {
                            config.save()?;
                            println!("{message}");
                        }
                        Err(err) => {
                            eprintln!("❌ {err}");
                            std::process::exit(1);
                        }
                    }
                }
                _ => config.print_all(),
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match config.unset_value(&key) {
                Ok(message) => {
                    config.save()?;
                    println!("{message}");
                }
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Auth => run_auth(),
        Commands::Deauth => run_deauth(),
    }
}
