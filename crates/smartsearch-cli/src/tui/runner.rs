//! TUI runner - main event loop for the terminal search box
//!
//! Mounts the controller, owns the terminal, and redraws whenever the
//! controller publishes a new state.

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use smartsearch_core::{EventBus, Lookup, QueryState, SearchController, SearchResult};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use super::app::{Flow, SearchApp};
use super::layout::Layout;
use super::render;
use crate::config::CliConfig;

const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Raw mode plus alternate screen, restored on exit or drop.
struct TerminalSession {
    stdout: io::Stdout,
    active: bool,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self {
            stdout,
            active: true,
        })
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.stdout, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        self.stdout.flush()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

/// Run the interactive search box until the user quits.
pub async fn run(config: &CliConfig, lookup: Arc<dyn Lookup>) -> Result<()> {
    let bus = EventBus::default();
    let (selected_tx, mut selected_rx) = mpsc::unbounded_channel();
    let on_select = move |item: &SearchResult| {
        if selected_tx.send(item.clone()).is_err() {
            trace!("selection receiver closed");
        }
    };

    let controller =
        SearchController::mount(config.search.clone(), lookup, Arc::new(on_select), &bus)?;
    let (width, height) = terminal::size().unwrap_or((80, 24));
    let mut app = SearchApp::new(controller.handle(), bus, config, Layout::new(width, height));

    let mut session = TerminalSession::enter()?;
    let result = event_loop(&mut session.stdout, &mut app, &mut selected_rx, controller.subscribe()).await;

    controller.unmount().await;
    session.exit()?;
    debug!("search box closed");
    result
}

async fn event_loop(
    out: &mut impl Write,
    app: &mut SearchApp,
    selected_rx: &mut mpsc::UnboundedReceiver<SearchResult>,
    mut states: watch::Receiver<QueryState>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut spinner = tokio::time::interval(SPINNER_INTERVAL);
    spinner.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let state = states.borrow_and_update().clone();
        app.sync(&state);
        render::draw(out, &app.layout(), &app.frame(&state))?;
        let loading = state.is_loading;

        tokio::select! {
            biased;

            event = events.next() => match event {
                Some(Ok(event)) => {
                    trace!(?event, "terminal event");
                    if app.on_terminal_event(event) == Flow::Exit {
                        break;
                    }
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    warn!("terminal event stream ended");
                    break;
                }
            },

            Some(item) = selected_rx.recv() => app.on_selected(&item),

            changed = states.changed() => {
                if changed.is_err() {
                    debug!("search controller stopped");
                    break;
                }
            }

            _ = spinner.tick(), if loading => app.tick(),
        }
    }
    Ok(())
}
