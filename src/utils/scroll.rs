//! Word wrapping done ahead of rendering.
//!
//! The transcript is wrapped here and drawn without ratatui's own wrapping,
//! so the row count used for scrolling is exactly the number of rows drawn.

use std::mem;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Wraps `lines` to `width` columns at spaces, keeping span styles. Words
/// longer than a row are split across rows.
pub fn prewrap_lines(lines: &[Line<'_>], width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let mut wrapper = LineWrapper::new(width, line.style);
        for span in &line.spans {
            for ch in span.content.chars() {
                if ch == ' ' {
                    wrapper.space(span.style, &mut out);
                } else {
                    wrapper.word_char(ch, span.style);
                }
            }
        }
        wrapper.finish(&mut out);
    }
    out
}

struct LineWrapper {
    width: usize,
    line_style: Style,
    spans: Vec<Span<'static>>,
    len: usize,
    wrapped: bool,
    word: Vec<(char, Style)>,
    word_width: usize,
}

impl LineWrapper {
    fn new(width: usize, line_style: Style) -> Self {
        Self {
            width,
            line_style,
            spans: Vec::new(),
            len: 0,
            wrapped: false,
            word: Vec::new(),
            word_width: 0,
        }
    }

    fn push_char(&mut self, ch: char, style: Style, ch_width: usize) {
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push(ch),
            _ => self.spans.push(Span::styled(ch.to_string(), style)),
        }
        self.len += ch_width;
    }

    fn emit(&mut self, out: &mut Vec<Line<'static>>) {
        out.push(Line::from(mem::take(&mut self.spans)).style(self.line_style));
        self.len = 0;
        self.wrapped = true;
    }

    fn word_char(&mut self, ch: char, style: Style) {
        self.word_width += ch.width().unwrap_or(0);
        self.word.push((ch, style));
    }

    fn flush_word(&mut self, out: &mut Vec<Line<'static>>) {
        if self.word.is_empty() {
            return;
        }
        if self.len > 0 && self.len + self.word_width > self.width {
            self.emit(out);
        }
        for (ch, style) in mem::take(&mut self.word) {
            let ch_width = ch.width().unwrap_or(0);
            if self.len > 0 && self.len + ch_width > self.width {
                self.emit(out);
            }
            self.push_char(ch, style, ch_width);
        }
        self.word_width = 0;
    }

    fn space(&mut self, style: Style, out: &mut Vec<Line<'static>>) {
        self.flush_word(out);
        if self.len == 0 && self.wrapped {
            return;
        }
        if self.len + 1 > self.width {
            self.emit(out);
            return;
        }
        self.push_char(' ', style, 1);
    }

    fn finish(mut self, out: &mut Vec<Line<'static>>) {
        self.flush_word(out);
        if !self.spans.is_empty() || !self.wrapped {
            self.emit(out);
        }
    }
}
