// src/ui.rs

use crate::api::BackendClient;
use crate::app::App;
use crate::chat_view;
use crate::errors::ConfabResult;
use crate::key_handlers;
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, Mutex};

enum Event {
    Input(CEvent),
    Tick,
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(app: Arc<Mutex<App>>, client: BackendClient) -> ConfabResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main loop: every frame redraws the chat screen, key events are handled
/// under the lock, and each submission spawns an independent send task.
/// Overlapping sends may complete out of order; the transcript just records
/// completions as they land.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    client: BackendClient,
) -> ConfabResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);

    // Reader task: forward crossterm events, emit ticks so the spinner
    // keeps animating while a send is in flight
    let reader = tokio::spawn(async move {
        let mut last_tick = Instant::now();
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(100)) {
                if let Ok(event) = event::read() {
                    if tx.send(Event::Input(event)).await.is_err() {
                        return;
                    }
                }
            }

            if last_tick.elapsed() >= Duration::from_millis(250) {
                if tx.send(Event::Tick).await.is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });

    loop {
        {
            let mut guard = app.lock().await;
            guard.status_indicator.update_spinner();
            terminal.draw(|f| chat_view::draw_chat(f, &mut guard))?;
            if guard.should_quit {
                break;
            }
        }

        match rx.recv().await {
            Some(Event::Input(CEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                let submission = {
                    let mut guard = app.lock().await;
                    key_handlers::handle_chat_key(key, &mut guard)
                };
                if let Some(text) = submission {
                    // One task per send, no ordering across sends
                    tokio::spawn(chat_view::run_send(app.clone(), client.clone(), text));
                }
            }
            Some(Event::Input(_)) | Some(Event::Tick) => {}
            None => break,
        }
    }

    reader.abort();
    Ok(())
}
