//! Terminal UI for interactive chat sessions.
//!
//! - [`chat_loop`]: terminal setup and the input/draw loop.
//! - [`renderer`]: layout and frame output.
//! - [`markdown`]: styled lines for assistant replies.

pub mod chat_loop;
pub mod markdown;
pub mod renderer;
