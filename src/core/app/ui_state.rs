use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

const INPUT_TITLE: &str =
    "Type your message (Enter to send, Alt+Enter for new line, /help for help, Ctrl+C to quit)";
const WAITING_TITLE: &str = "Thinking... waiting for the endpoint to reply";
const MAX_INPUT_LINES: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Error,
}

/// A line (or a few) shown between the transcript and the input box. Banners
/// are never part of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct UiState {
    textarea: TextArea<'static>,
    pub banner: Option<Banner>,
    /// Prompt shown while its turn is in flight.
    pub pending_prompt: Option<String>,
    /// Lines scrolled back from the bottom of the transcript; 0 follows new output.
    pub scroll_back: u16,
    pub markdown_enabled: bool,
    pub exit_requested: bool,
}

impl UiState {
    pub fn new(markdown_enabled: bool) -> Self {
        let mut state = Self {
            textarea: TextArea::default(),
            banner: None,
            pending_prompt: None,
            scroll_back: 0,
            markdown_enabled,
            exit_requested: false,
        };
        state.configure_textarea();
        state
    }

    fn configure_textarea(&mut self) {
        let (title, border) = if self.is_waiting() {
            (WAITING_TITLE, Style::default().fg(Color::DarkGray))
        } else {
            (INPUT_TITLE, Style::default().fg(Color::Cyan))
        };
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        );
        self.textarea
            .set_cursor_line_style(Style::default().remove_modifier(Modifier::UNDERLINED));
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Returns the input box contents and leaves it empty.
    pub fn take_input(&mut self) -> String {
        let text = self.input_text();
        self.textarea = TextArea::default();
        self.configure_textarea();
        text
    }

    pub fn insert_text(&mut self, text: &str) {
        self.textarea.insert_str(text);
    }

    /// Rows the input box needs, borders included.
    pub fn input_height(&self) -> u16 {
        let lines = self.textarea.lines().len().max(1) as u16;
        lines.clamp(1, MAX_INPUT_LINES) + 2
    }

    pub fn is_waiting(&self) -> bool {
        self.pending_prompt.is_some()
    }

    pub fn begin_waiting(&mut self, prompt: &str) {
        self.pending_prompt = Some(prompt.to_string());
        self.scroll_back = 0;
        self.configure_textarea();
    }

    pub fn end_waiting(&mut self) {
        self.pending_prompt = None;
        self.configure_textarea();
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner {
            kind: BannerKind::Error,
            text: text.into(),
        });
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner {
            kind: BannerKind::Info,
            text: text.into(),
        });
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Keeps `scroll_back` within the scrollable range measured at render time.
    pub fn clamp_scroll(&mut self, max_scroll: u16) {
        self.scroll_back = self.scroll_back.min(max_scroll);
    }
}
