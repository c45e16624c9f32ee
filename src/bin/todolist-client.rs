//! Terminal client for the task list API.
//!
//! # Environment Variables
//!
//! - `TODOLIST_API_URL`: API base URL (default: `http://localhost:3000`)
//! - `TODOLIST_LIST_HIDDEN`: start with the list hidden when set to `1` or `true`
//! - `RUST_LOG`: Logging filter, written to stderr (default: off, since the
//!   terminal is in use; redirect with `2>client.log`)

use std::env;
use std::io;

use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todolist::client::HttpTodoApi;
use todolist::client::http::DEFAULT_BASE_URL;
use todolist::ui::{KeyOutcome, Screen, TodoView, render};

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "off".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let base_url = env::var("TODOLIST_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let list_hidden = env::var("TODOLIST_LIST_HIDDEN")
        .is_ok_and(|value| matches!(value.trim(), "1" | "true"));

    tracing::debug!(%base_url, "Connecting to task API");
    let mut view = TodoView::new(HttpTodoApi::new(base_url), !list_hidden);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &mut view).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(error) = result {
        tracing::error!(%error, "Terminal I/O failed");
        eprintln!("{error}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &mut TodoView<HttpTodoApi>,
) -> io::Result<()> {
    let mut screen = Screen::new();
    let mut events = EventStream::new();
    view.open().await;

    loop {
        screen.sync(view.state());
        terminal.draw(|frame| render(frame, view.state(), &mut screen))?;

        let Some(event) = events.next().await else {
            return Ok(());
        };
        if let Event::Key(key) = event? {
            match screen.handle_key(view.state(), key) {
                KeyOutcome::Quit => return Ok(()),
                KeyOutcome::Dispatch(action) => view.dispatch(action).await,
                KeyOutcome::Handled => {}
            }
        }
    }
}
