//! Main chat event loop.
//!
//! The loop owns the [`App`] outright. Sending a turn awaits the reply in
//! place, after drawing the pending prompt and the thinking indicator, so
//! there is never more than one request in flight.

mod keybindings;
mod lifecycle;

pub use keybindings::{handle_key, KeyOutcome};

use std::{error::Error, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info};

use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::app::App;
use crate::ui::renderer::{compute_layout, max_scroll, ui};
use crate::utils::input::sanitize_text_input;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const MOUSE_SCROLL_LINES: u16 = 3;

pub async fn run_chat(app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, app).await;
    restore_terminal(&mut terminal)?;
    result
}

fn draw(terminal: &mut ChatTerminal, app: &mut App) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    app.ui.clamp_scroll(max_scroll(app, area));
    terminal.draw(|f| ui(f, app))?;
    Ok(())
}

fn page_rows(terminal: &ChatTerminal, app: &App) -> u16 {
    terminal
        .size()
        .map(|size| {
            compute_layout(Rect::new(0, 0, size.width, size.height), app)
                .transcript
                .height
        })
        .unwrap_or(1)
}

async fn event_loop(terminal: &mut ChatTerminal, mut app: App) -> Result<(), Box<dyn Error>> {
    info!(url = app.client.url(), model = app.client.model(), "chat session started");

    while !app.ui.exit_requested {
        draw(terminal, &mut app)?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let rows = page_rows(terminal, &app);
                match handle_key(&mut app, key, rows) {
                    KeyOutcome::Exit => break,
                    KeyOutcome::Redraw => {}
                    KeyOutcome::Submit(prompt) => {
                        app.begin_turn(&prompt);
                        draw(terminal, &mut app)?;
                        // The error, if any, is already on the banner.
                        let _ = app.complete_turn(&prompt).await;
                    }
                }
            }
            Event::Paste(text) => {
                app.ui.insert_text(&sanitize_text_input(&text));
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => app.ui.scroll_up(MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollDown => app.ui.scroll_down(MOUSE_SCROLL_LINES),
                _ => {}
            },
            other => debug!(event = ?other, "ignored terminal event"),
        }
    }

    info!(turns = app.transcript.len(), "chat session ended");
    Ok(())
}
