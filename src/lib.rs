//! relaychat is a terminal chat front-end that relays a conversation to a
//! remote chat endpoint and renders the exchange.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the transcript, configuration, the request/reply cycle and
//!   the session state held by the chat loop.
//! - [`ui`] renders the terminal interface and runs the interactive loop.
//! - [`commands`] implements the slash commands typed into the input box.
//! - [`api`] defines the request and reply payloads sent over the wire.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
