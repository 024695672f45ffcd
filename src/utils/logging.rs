use crate::core::message::{Message, Transcript};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

const USER_PREFIX: &str = "You";

/// Append-only copy of the transcript written to a user-chosen file.
pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState {
            file_path: None,
            is_active: false,
        };
        if let Some(path) = log_file {
            logging.set_log_file(path)?;
        }
        Ok(logging)
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        // Fail now rather than on the first logged turn
        test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;

        Ok(format!("Logging enabled to: {path}"))
    }

    pub fn toggle_logging(
        &mut self,
        pause_message: &str,
    ) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                if self.is_active {
                    self.log_line(&format!("## {pause_message}"))?;
                    self.is_active = false;
                    Ok(format!("Logging paused (file: {path})"))
                } else {
                    self.is_active = true;
                    Ok(format!("Logging resumed to: {path}"))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    pub fn log_turn(&self, message: &Message) -> Result<(), Box<dyn std::error::Error>> {
        self.log_line(&format_turn(message))
    }

    pub fn log_line(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref().filter(|_| self.is_active) else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);
        write_block(&mut writer, content)?;
        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!("active ({})", file_name(path)),
            (Some(path), false) => format!("paused ({})", file_name(path)),
        }
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn test_file_access(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.flush()?;
    Ok(())
}

fn format_turn(message: &Message) -> String {
    if message.is_user() {
        format!("{USER_PREFIX}: {}", message.content)
    } else {
        message.content.clone()
    }
}

/// Each line as-is, then a blank separator line.
fn write_block<W: Write>(writer: &mut W, content: &str) -> std::io::Result<()> {
    for line in content.lines() {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer)
}

/// Writes the whole transcript to `filename` in the `/log` format.
/// An existing file is never overwritten.
pub fn dump_transcript(
    transcript: &Transcript,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if transcript.is_empty() {
        return Err("No conversation to dump - the chat history is empty.".into());
    }

    if Path::new(filename).exists() {
        return Err(format!(
            "File '{filename}' already exists. Please specify a different filename with /dump <filename>."
        )
        .into());
    }

    let mut writer = BufWriter::new(File::create(filename)?);
    for message in transcript {
        write_block(&mut writer, &format_turn(message))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path_in(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn inactive_logging_writes_nothing() {
        let logging = LoggingState::new(None).expect("state");
        logging
            .log_turn(&Message::user("hello"))
            .expect("noop write");
        assert_eq!(logging.get_status_string(), "disabled");
    }

    #[test]
    fn logs_turns_with_user_prefix_and_spacing() {
        let dir = TempDir::new().expect("tempdir");
        let path = path_in(&dir, "chat.log");
        let logging = LoggingState::new(Some(path.clone())).expect("state");

        logging.log_turn(&Message::user("hello")).expect("log");
        logging
            .log_turn(&Message::assistant("line one\nline two"))
            .expect("log");

        let contents = std::fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "You: hello\n\nline one\nline two\n\n");
        assert_eq!(logging.get_status_string(), "active (chat.log)");
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let dir = TempDir::new().expect("tempdir");
        let path = path_in(&dir, "chat.log");
        let mut logging = LoggingState::new(None).expect("state");

        assert!(logging.toggle_logging("paused").is_err());
        logging.set_log_file(path.clone()).expect("set");

        let message = logging.toggle_logging("Logging paused").expect("pause");
        assert!(message.starts_with("Logging paused"));
        assert!(!logging.is_active());
        logging.log_turn(&Message::user("ignored")).expect("noop");

        logging.toggle_logging("unused").expect("resume");
        assert!(logging.is_active());

        let contents = std::fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "## Logging paused\n\n");
    }

    #[test]
    fn dump_refuses_empty_and_existing_files() {
        let dir = TempDir::new().expect("tempdir");
        let path = path_in(&dir, "dump.txt");
        let mut transcript = Transcript::new();

        assert!(dump_transcript(&transcript, &path).is_err());

        transcript.push_user("hi");
        transcript.push_assistant("hello");
        dump_transcript(&transcript, &path).expect("first dump");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "You: hi\n\nhello\n\n"
        );

        transcript.push_user("more");
        let err = dump_transcript(&transcript, &path).expect_err("exists");
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "You: hi\n\nhello\n\n"
        );
    }
}
