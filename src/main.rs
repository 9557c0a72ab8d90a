//! An infinite colour carousel for the terminal.
//!
//! Run the binary to launch the carousel.  Drag across it or use the arrow
//! keys to swipe, click a small swatch to jump to it.
//! Run with `--print-config` to see the effective configuration.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
    timer::TokioScheduler,
};
use crate::config::MAX_NEIGHBORS_PER_SIDE;
use crate::core::schedule::Scheduler;
use crate::ui::{
    carousel::{PanelWidget, StripWidget},
    layout::AppLayout,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Infinite colour carousel")]
struct Cli {
    /// Small swatches on each side of the selected one (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_NEIGHBORS_PER_SIDE as i64))]
    neighbors: Option<u8>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

/// Poll interval for terminal input; also the redraw rate while idle and
/// the frame rate during transitions.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut user_config = config::AppConfig::load();
    if let Some(n) = cli.neighbors {
        user_config.neighbors_per_side = usize::from(n);
    }

    // ── config-only modes ─────────────────────────────────────
    if cli.print_config {
        print!("{}", user_config.serialise());
        return Ok(());
    }
    if cli.write_config {
        let path = user_config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // ── async channel shared by input and commit timers ───────
    let (tx, mut events) = tokio::sync::mpsc::unbounded_channel::<AppEvent>();

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    let mut state = AppState::new(user_config, TokioScheduler::new(tx.clone()), area)?;

    spawn_event_reader(FRAME_INTERVAL, tx);

    // ── event loop ────────────────────────────────────────────
    let mut dirty = true;
    loop {
        // Idle ticks don't change anything on screen; transitions redraw
        // every tick.
        if dirty || state.carousel.is_transitioning() {
            draw(&mut terminal, &state)?;
            dirty = false;
        }

        let Some(event) = events.recv().await else {
            break;
        };
        let now = Instant::now();
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k, now),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, now),
            AppEvent::Resize(w, h) => {
                state.resize(Rect::new(0, 0, w, h));
            }
            AppEvent::Commit(ticket) => {
                state.carousel.on_timer(ticket);
            }
            AppEvent::Tick => continue,
        }
        dirty = true;

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.carousel.abort_transition();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw<S: Scheduler>(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &AppState<S>,
) -> Result<()> {
    let now = Instant::now();
    let frame = state.carousel.frame(now);
    let progress = state.carousel.progress(now).unwrap_or(0.0);

    terminal.draw(|f| {
        let layout = AppLayout::from_area(f.area());

        f.render_widget(
            StripWidget {
                ring: &state.ring,
                frame,
                per_side: state.carousel.per_side(),
                geometry: state.carousel.geometry(),
                progress,
            },
            layout.strip_area,
        );
        f.render_widget(
            PanelWidget {
                ring: &state.ring,
                frame,
            },
            layout.panel_area,
        );

        let counter = match state.carousel.pending_index() {
            Some(next) => format!(
                " {}→{}/{} ",
                frame.selected_index + 1,
                next + 1,
                state.ring.len()
            ),
            None => format!(" {}/{} ", frame.selected_index + 1, state.ring.len()),
        };
        let status_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(counter.chars().count() as u16),
            ])
            .split(layout.status_area);
        let hint = Paragraph::new(state.config.status_bar_hint())
            .style(Theme::status_bar_style());
        f.render_widget(hint, status_cols[0]);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(counter, Theme::counter_style()))),
            status_cols[1],
        );
    })?;
    Ok(())
}
