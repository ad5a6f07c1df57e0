use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Classification metadata attached to bot bubbles. Display and logging
/// only, never consulted for control flow.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageMeta {
    pub intent: String,
    pub confidence: f64,
}

impl MessageMeta {
    pub fn new(intent: impl Into<String>, confidence: f64) -> Self {
        Self {
            intent: intent.into(),
            confidence,
        }
    }

    pub fn greeting() -> Self {
        Self::new("greeting", 1.0)
    }

    pub fn error() -> Self {
        Self::new("error", 0.0)
    }
}

/// One entry in the transcript. Append-only: a message is never mutated
/// after it has been pushed.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    text: String,
    sender: Sender,
    timestamp: DateTime<Local>,
    meta: Option<MessageMeta>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: Local::now(),
            meta: None,
        }
    }

    pub fn bot(text: impl Into<String>, meta: MessageMeta) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: Local::now(),
            meta: Some(meta),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn meta(&self) -> Option<&MessageMeta> {
        self.meta.as_ref()
    }

    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let style = self.base_style();

        self.render_header(&mut lines, style);
        self.render_content(&mut lines, area, style);
        self.render_footer(&mut lines, style);

        lines
    }

    fn base_style(&self) -> Style {
        Style::default().fg(match self.sender {
            Sender::User => Color::Rgb(255, 223, 128),
            Sender::Bot => Color::Rgb(144, 238, 144),
        })
    }

    fn indent(&self) -> &'static str {
        match self.sender {
            Sender::User => "  ",
            Sender::Bot => "",
        }
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let label = match self.sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };

        let mut spans = vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
            Span::styled(format!(" {}", label), style),
        ];

        if let Some(meta) = &self.meta {
            spans.push(Span::styled(
                format!("  {} ({:.2})", meta.intent, meta.confidence),
                style.add_modifier(Modifier::DIM),
            ));
        }

        lines.push(Line::from(spans));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);

        for source_line in self.text.lines() {
            if source_line.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│".to_string(), style),
                ]));
                continue;
            }

            for wrapped in wrap(source_line, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(self.indent().to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped.to_string(), style),
                ]));
            }
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }
}
