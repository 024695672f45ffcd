//! Diagnostic logging through `tracing`.
//!
//! The terminal UI owns stdout and stderr while it runs, so interactive
//! sessions log to a file. One-shot commands log to stderr.

use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::config::io::project_dirs;

/// Environment variable holding `tracing` filter directives.
pub const TRACE_ENV: &str = "RELAYCHAT_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

pub enum TraceTarget {
    Stderr,
    File(PathBuf),
}

impl TraceTarget {
    /// `relaychat.log` in the platform cache directory, or stderr when no
    /// cache directory exists.
    pub fn default_file() -> Self {
        project_dirs()
            .map(|dirs| TraceTarget::File(dirs.cache_dir().join("relaychat.log")))
            .unwrap_or(TraceTarget::Stderr)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(TRACE_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

pub fn init_tracing(target: TraceTarget) -> Result<(), Box<dyn Error>> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    let installed = match target {
        TraceTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        TraceTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(|err| -> Box<dyn Error> { err })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_lives_in_cache_dir() {
        if let TraceTarget::File(path) = TraceTarget::default_file() {
            assert_eq!(
                path.file_name().and_then(|name| name.to_str()),
                Some("relaychat.log")
            );
        }
    }
}
