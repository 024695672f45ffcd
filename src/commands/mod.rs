//! Slash commands typed into the input box.
//!
//! Commands act on the session and report through the banner. They never add
//! turns to the transcript. Input that does not name a known command is sent
//! to the endpoint as an ordinary message.

mod registry;

pub use registry::{all_commands, find_command, CommandInvocation};

use crate::core::app::App;
use crate::utils::logging::dump_transcript;
use chrono::{Local, Utc};

const USAGE_LOG: &str = "Usage: /log [filename]";
const USAGE_DUMP: &str = "Usage: /dump [filename]";

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    let Some(rest) = trimmed.strip_prefix('/') else {
        return CommandResult::ProcessAsMessage(input.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    match registry::find_command(command_name) {
        Some(command) => (command.handler)(
            app,
            CommandInvocation {
                input: trimmed,
                args,
            },
        ),
        None => CommandResult::ProcessAsMessage(input.to_string()),
    }
}

pub fn help_text() -> String {
    let mut help = String::from("Commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  {:<18} {}\n", command.usage, command.help));
    }
    help.push_str(
        "Keys: Enter send • Alt+Enter new line • Up/Down/PgUp/PgDn/mouse scroll • Ctrl+C quit",
    );
    help
}

fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.ui.set_info(help_text());
    CommandResult::Continue
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

fn handle_log(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    match invocation.arg_list().as_slice() {
        [] => {
            let note = if app.logging.is_active() {
                format!("Logging paused at {}", timestamp())
            } else {
                format!("Logging resumed at {}", timestamp())
            };
            match app.logging.toggle_logging(&note) {
                Ok(message) => app.ui.set_info(message),
                Err(e) => app.ui.set_error(format!("Log error: {e}")),
            }
        }
        [filename] => match app.logging.set_log_file(filename.to_string()) {
            Ok(message) => {
                let header = format!("## Logging started at {}", timestamp());
                match app.logging.log_line(&header) {
                    Ok(()) => app.ui.set_info(message),
                    Err(e) => app.ui.set_error(format!("Logfile error: {e}")),
                }
            }
            Err(e) => app.ui.set_error(format!("Logfile error: {e}")),
        },
        _ => app.ui.set_info(USAGE_LOG),
    }
    CommandResult::Continue
}

fn handle_dump(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let filename = match invocation.arg_list().as_slice() {
        [] => format!("relaychat-log-{}.txt", Utc::now().format("%Y-%m-%d")),
        [filename] => filename.to_string(),
        _ => {
            app.ui.set_info(USAGE_DUMP);
            return CommandResult::Continue;
        }
    };

    match dump_transcript(&app.transcript, &filename) {
        Ok(()) => app.ui.set_info(format!("Dumped: {filename}")),
        Err(e) => app.ui.set_error(format!("Dump error: {e}")),
    }
    CommandResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::test_support::create_test_app;
    use crate::core::app::BannerKind;
    use tempfile::TempDir;

    fn app() -> App {
        create_test_app("https://chat.example.com")
    }

    #[test]
    fn plain_text_is_a_message() {
        let mut app = app();
        assert_eq!(
            process_input(&mut app, "hello there"),
            CommandResult::ProcessAsMessage("hello there".to_string())
        );
    }

    #[test]
    fn unknown_slash_input_is_a_message() {
        let mut app = app();
        assert_eq!(
            process_input(&mut app, "/etc/hosts is a file"),
            CommandResult::ProcessAsMessage("/etc/hosts is a file".to_string())
        );
        assert_eq!(
            process_input(&mut app, "/"),
            CommandResult::ProcessAsMessage("/".to_string())
        );
        assert!(app.ui.banner.is_none());
    }

    #[test]
    fn help_sets_info_banner_without_touching_transcript() {
        let mut app = app();
        assert_eq!(process_input(&mut app, "/HELP"), CommandResult::Continue);
        let banner = app.ui.banner.clone().expect("banner");
        assert_eq!(banner.kind, BannerKind::Info);
        assert!(banner.text.contains("/dump [filename]"));
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn log_without_file_reports_error() {
        let mut app = app();
        process_input(&mut app, "/log");
        let banner = app.ui.banner.clone().expect("banner");
        assert_eq!(banner.kind, BannerKind::Error);
        assert!(banner.text.contains("No log file specified"));
    }

    #[test]
    fn log_with_file_enables_logging() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("session.log");
        let mut app = app();

        process_input(&mut app, &format!("/log {}", path.display()));

        assert!(app.logging.is_active());
        let contents = std::fs::read_to_string(&path).expect("log file");
        assert!(contents.starts_with("## Logging started at"));

        process_input(&mut app, "/log");
        assert!(!app.logging.is_active());
    }

    #[test]
    fn dump_writes_transcript() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("dump.txt");
        let mut app = app();
        app.transcript.push_user("hi");
        app.transcript.push_assistant("hello");

        process_input(&mut app, &format!("/dump {}", path.display()));

        assert_eq!(
            app.ui.banner.clone().map(|b| b.kind),
            Some(BannerKind::Info)
        );
        assert_eq!(
            std::fs::read_to_string(&path).expect("dump"),
            "You: hi\n\nhello\n\n"
        );
    }

    #[test]
    fn dump_of_empty_transcript_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("dump.txt");
        let mut app = app();
        process_input(&mut app, &format!("/dump {}", path.display()));
        assert_eq!(
            app.ui.banner.clone().map(|b| b.kind),
            Some(BannerKind::Error)
        );
        assert!(!path.exists());
    }
}
