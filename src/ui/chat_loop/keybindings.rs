//! Key handling for the chat loop.
//!
//! Kept free of terminal I/O so the loop only has to act on the outcome.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::utils::input::prepare_message;

#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Exit,
    Redraw,
    /// A message to send as the next turn.
    Submit(String),
}

/// Applies `key` to the session. `page_rows` is the transcript height used
/// for PageUp/PageDown.
pub fn handle_key(app: &mut App, key: KeyEvent, page_rows: u16) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => {
            app.ui.exit_requested = true;
            KeyOutcome::Exit
        }
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
        {
            app.ui.textarea_mut().insert_newline();
            KeyOutcome::Redraw
        }
        KeyCode::Enter => submit(app),
        KeyCode::Up => {
            app.ui.scroll_up(1);
            KeyOutcome::Redraw
        }
        KeyCode::Down => {
            app.ui.scroll_down(1);
            KeyOutcome::Redraw
        }
        KeyCode::PageUp => {
            app.ui.scroll_up(page_rows.max(1));
            KeyOutcome::Redraw
        }
        KeyCode::PageDown => {
            app.ui.scroll_down(page_rows.max(1));
            KeyOutcome::Redraw
        }
        _ => {
            app.ui.textarea_mut().input(TAInput::from(key));
            KeyOutcome::Redraw
        }
    }
}

fn submit(app: &mut App) -> KeyOutcome {
    if app.ui.is_waiting() {
        return KeyOutcome::Redraw;
    }
    let Some(message) = prepare_message(&app.ui.input_text()) else {
        return KeyOutcome::Redraw;
    };
    app.ui.take_input();

    match process_input(app, &message) {
        CommandResult::Continue => KeyOutcome::Redraw,
        CommandResult::ProcessAsMessage(text) => KeyOutcome::Submit(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::test_support::create_test_app;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)), 10);
        }
    }

    #[test]
    fn ctrl_c_and_ctrl_d_exit() {
        let mut app = create_test_app("https://chat.example.com");
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                10
            ),
            KeyOutcome::Exit
        );
        assert!(app.ui.exit_requested);

        let mut app = create_test_app("https://chat.example.com");
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
                10
            ),
            KeyOutcome::Exit
        );
    }

    #[test]
    fn enter_submits_typed_text_and_clears_input() {
        let mut app = create_test_app("https://chat.example.com");
        type_text(&mut app, "hello");

        assert_eq!(
            handle_key(&mut app, key(KeyCode::Enter), 10),
            KeyOutcome::Submit("hello".to_string())
        );
        assert_eq!(app.ui.input_text(), "");
    }

    #[test]
    fn alt_enter_inserts_newline() {
        let mut app = create_test_app("https://chat.example.com");
        type_text(&mut app, "one");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT),
            10,
        );
        type_text(&mut app, "two");

        assert_eq!(app.ui.input_text(), "one\ntwo");
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Enter), 10),
            KeyOutcome::Submit("one\ntwo".to_string())
        );
    }

    #[test]
    fn blank_input_is_not_sent() {
        let mut app = create_test_app("https://chat.example.com");
        type_text(&mut app, "   ");
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter), 10), KeyOutcome::Redraw);
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn slash_command_runs_locally() {
        let mut app = create_test_app("https://chat.example.com");
        type_text(&mut app, "/help");
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter), 10), KeyOutcome::Redraw);
        assert!(app.ui.banner.is_some());
        assert_eq!(app.ui.input_text(), "");
    }

    #[test]
    fn enter_is_ignored_while_waiting() {
        let mut app = create_test_app("https://chat.example.com");
        app.begin_turn("first");
        type_text(&mut app, "second");
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter), 10), KeyOutcome::Redraw);
        assert_eq!(app.ui.input_text(), "second");
    }

    #[test]
    fn scroll_keys_move_by_line_and_page() {
        let mut app = create_test_app("https://chat.example.com");
        handle_key(&mut app, key(KeyCode::PageUp), 7);
        assert_eq!(app.ui.scroll_back, 7);
        handle_key(&mut app, key(KeyCode::Up), 7);
        assert_eq!(app.ui.scroll_back, 8);
        handle_key(&mut app, key(KeyCode::Down), 7);
        handle_key(&mut app, key(KeyCode::PageDown), 7);
        assert_eq!(app.ui.scroll_back, 0);
        handle_key(&mut app, key(KeyCode::Down), 7);
        assert_eq!(app.ui.scroll_back, 0);
    }
}
