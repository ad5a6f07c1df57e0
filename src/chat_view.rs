use crate::api::BackendClient;
use crate::app::App;
use crate::chat_message::MessageMeta;
use crate::errors::ApiError;
use log::{error, info};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

pub const NETWORK_ERROR_REPLY: &str = "Network error: failed to reach the server.";

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(size);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_vertical_chunks[0]);

    app.status_indicator.render(f, chat_vertical_chunks[1]);

    draw_input(f, app, chat_vertical_chunks[2]);
    draw_logs(f, app, horizontal_chunks[1], size);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();
    for message in app.messages.iter() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message.render(area));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    // Appends park the scroll at u16::MAX so the view sticks to the bottom
    app.chat_scroll = app.chat_scroll.min(max_scroll);

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: true });
    f.render_widget(msgs_para.scroll((app.chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    // History recall gets its own prompt marker
    let prefix = if app.command_index.is_some() {
        "⌃ "
    } else {
        "→ "
    };
    let prefix_style = if app.command_index.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let current_line = app.input.lines().last().unwrap_or("");
    let input = Line::from(vec![
        Span::styled(prefix, prefix_style),
        Span::styled(current_line, Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = current_line.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        },
    );

    if let Some(idx) = app.command_index {
        let history_text = format!(" [History {}/{}] ", idx + 1, app.command_history.len());
        let indicator_width = history_text.len() as u16;

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                history_text,
                Style::default().fg(Color::Yellow).bg(Color::Black),
            ))),
            Rect {
                x: area.x + area.width - indicator_width,
                y: area.y + 1,
                width: indicator_width,
                height: 1,
            },
        );
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    let cursor_x = area.x + 2 + text_width - scroll_offset;
    f.set_cursor_position((cursor_x, area.y + 1));
}

fn draw_logs(f: &mut Frame, app: &mut App, area: Rect, size: Rect) {
    let vsep = "│".repeat(size.height.saturating_sub(2) as usize);
    f.render_widget(
        Paragraph::new(Span::raw(vsep)).style(Style::default().fg(Color::DarkGray)),
        Rect {
            x: area.x.saturating_sub(1),
            y: 1,
            width: 1,
            height: size.height.saturating_sub(2),
        },
    );

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.as_str()),
            ])
        })
        .collect();

    let total_log_lines = log_lines.len() as u16;
    let max_log_scroll = total_log_lines.saturating_sub(area.height);
    app.logs_scroll = app.logs_scroll.min(max_log_scroll);

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para.scroll((app.logs_scroll, 0)), area);
}

/// One send, start to finish. The user echo was already appended and the
/// typing indicator switched on by `App::take_submission`; this task owns
/// the rest: resolve the HTTP call, clear the indicator, render exactly one
/// bot bubble. The indicator is cleared before the outcome is inspected so
/// no path can leave it stuck.
pub async fn run_send(app: Arc<Mutex<App>>, client: BackendClient, user_input: String) {
    let result = client.send_message(&user_input).await;

    let mut guard = app.lock().await;
    guard.status_indicator.set_typing(false);
    guard.status_indicator.clear_status();

    match result {
        Ok(reply) => {
            info!(
                "reply received (intent={}, confidence={:.2})",
                reply.intent, reply.confidence
            );
            guard.logs.add(format!(
                "reply: intent={} confidence={:.2}",
                reply.intent, reply.confidence
            ));
            let meta = MessageMeta::new(reply.intent, reply.confidence);
            guard.push_bot_reply(reply.text, meta);
        }
        Err(err) => {
            error!("send failed: {}", err);
            guard.logs.add(format!("send failed: {}", err));
            let text = match &err {
                ApiError::Server { status } => format!("Server error: HTTP {}.", status),
                ApiError::Network(_) => NETWORK_ERROR_REPLY.to_string(),
            };
            guard.push_bot_reply(text, MessageMeta::error());
        }
    }

    guard.logs.add("request complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_message::Sender;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn submit(app: &Arc<Mutex<App>>, text: &str) -> String {
        let mut guard = app.lock().await;
        guard.input = text.to_string();
        let submission = guard.take_submission().expect("non-empty submission");
        assert!(guard.status_indicator.is_typing());
        submission
    }

    #[tokio::test]
    async fn successful_send_appends_reply_and_clears_typing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "hi",
                "intent": "greet",
                "confidence": 0.9
            })))
            .mount(&server)
            .await;

        let app = Arc::new(Mutex::new(App::new()));
        let text = submit(&app, "hello").await;
        run_send(app.clone(), BackendClient::new(server.uri()), text).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages.len(), 2);
        assert_eq!(guard.messages[0].sender(), Sender::User);
        assert_eq!(guard.messages[1].sender(), Sender::Bot);
        assert_eq!(guard.messages[1].text(), "hi");
        let meta = guard.messages[1].meta().unwrap();
        assert_eq!(meta.intent, "greet");
        assert_eq!(meta.confidence, 0.9);
        assert!(!guard.status_indicator.is_typing());
    }

    #[tokio::test]
    async fn server_error_renders_status_code_bubble() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = Arc::new(Mutex::new(App::new()));
        let text = submit(&app, "hello").await;
        run_send(app.clone(), BackendClient::new(server.uri()), text).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages.len(), 2);
        assert!(guard.messages[1].text().contains("500"));
        let meta = guard.messages[1].meta().unwrap();
        assert_eq!(meta.intent, "error");
        assert_eq!(meta.confidence, 0.0);
        assert!(!guard.status_indicator.is_typing());
    }

    #[tokio::test]
    async fn network_failure_renders_fixed_error_bubble() {
        let app = Arc::new(Mutex::new(App::new()));
        let text = submit(&app, "hello").await;
        run_send(app.clone(), BackendClient::new("http://127.0.0.1:1"), text).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages.len(), 2);
        assert_eq!(guard.messages[1].text(), NETWORK_ERROR_REPLY);
        let meta = guard.messages[1].meta().unwrap();
        assert_eq!(meta.intent, "error");
        assert_eq!(meta.confidence, 0.0);
        assert!(!guard.status_indicator.is_typing());
    }

    #[tokio::test]
    async fn missing_response_field_renders_fallback_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let app = Arc::new(Mutex::new(App::new()));
        let text = submit(&app, "hello").await;
        run_send(app.clone(), BackendClient::new(server.uri()), text).await;

        let guard = app.lock().await;
        assert_eq!(guard.messages[1].text(), crate::api::FALLBACK_REPLY);
        let meta = guard.messages[1].meta().unwrap();
        assert_eq!(meta.intent, "unknown");
        assert_eq!(meta.confidence, 0.0);
    }
}
