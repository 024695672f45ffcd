use crate::core::app::{App, BannerKind};
use crate::ui::markdown::{render_markdown, render_plain};
use crate::utils::scroll::prewrap_lines;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

const MAX_BANNER_LINES: u16 = 8;
const USER_PREFIX: &str = "You: ";

pub struct ChatLayout {
    pub title: Rect,
    pub caption: Rect,
    pub transcript: Rect,
    pub banner: Rect,
    pub input: Rect,
}

fn banner_height(app: &App) -> u16 {
    app.ui
        .banner
        .as_ref()
        .map(|banner| (banner.text.lines().count().max(1) as u16).min(MAX_BANNER_LINES))
        .unwrap_or(0)
}

pub fn compute_layout(area: Rect, app: &App) -> ChatLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(banner_height(app)),
            Constraint::Length(app.ui.input_height()),
        ])
        .split(area);

    ChatLayout {
        title: chunks[0],
        caption: chunks[1],
        transcript: chunks[2],
        banner: chunks[3],
        input: chunks[4],
    }
}

/// Transcript lines, followed by the in-flight prompt when a turn is waiting.
pub fn build_display_lines(app: &App) -> Vec<Line<'static>> {
    let user_prefix_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let user_text_style = Style::default().fg(Color::Cyan);
    let assistant_style = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    let push_user = |lines: &mut Vec<Line<'static>>, content: &str| {
        let mut content_lines = content.lines();
        let first = content_lines.next().unwrap_or_default().to_string();
        lines.push(Line::from(vec![
            Span::styled(USER_PREFIX, user_prefix_style),
            Span::styled(first, user_text_style),
        ]));
        for rest in content_lines {
            lines.push(Line::from(Span::styled(rest.to_string(), user_text_style)));
        }
        lines.push(Line::default());
    };

    for message in &app.transcript {
        if message.is_user() {
            push_user(&mut lines, &message.content);
        } else {
            let rendered = if app.ui.markdown_enabled {
                render_markdown(&message.content, assistant_style)
            } else {
                render_plain(&message.content, assistant_style)
            };
            lines.extend(rendered);
            lines.push(Line::default());
        }
    }

    if let Some(prompt) = &app.ui.pending_prompt {
        push_user(&mut lines, prompt);
        lines.push(Line::from(Span::styled(
            "Thinking...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

/// Display lines wrapped to the transcript width. Rendering and scrolling
/// both use these rows, so the bottom of the view is always the newest turn.
pub fn transcript_rows(app: &App, width: u16) -> Vec<Line<'static>> {
    prewrap_lines(&build_display_lines(app), width)
}

fn row_count(rows: &[Line<'_>]) -> u16 {
    u16::try_from(rows.len()).unwrap_or(u16::MAX)
}

/// How far the transcript can scroll at the current size.
pub fn max_scroll(app: &App, area: Rect) -> u16 {
    let layout = compute_layout(area, app);
    let rows = transcript_rows(app, layout.transcript.width);
    row_count(&rows).saturating_sub(layout.transcript.height)
}

pub fn ui(f: &mut Frame, app: &App) {
    let layout = compute_layout(f.area(), app);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            app.title(),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        layout.title,
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            app.caption(),
            Style::default().fg(Color::DarkGray),
        ))),
        layout.caption,
    );

    let rows = transcript_rows(app, layout.transcript.width);
    let bottom = row_count(&rows).saturating_sub(layout.transcript.height);
    let scroll_offset = bottom.saturating_sub(app.ui.scroll_back.min(bottom));

    f.render_widget(
        Paragraph::new(rows).scroll((scroll_offset, 0)),
        layout.transcript,
    );

    if let Some(banner) = &app.ui.banner {
        let style = match banner.kind {
            BannerKind::Error => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            BannerKind::Info => Style::default().fg(Color::Gray),
        };
        f.render_widget(
            Paragraph::new(banner.text.clone())
                .style(style)
                .wrap(Wrap { trim: false }),
            layout.banner,
        );
    }

    f.render_widget(app.ui.textarea(), layout.input);
}
