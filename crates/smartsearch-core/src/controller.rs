//! Composition root for the search box.
//!
//! [`SearchController::mount`] spawns one task that owns the [`QueryState`].
//! Everything that wants to change the state sends it a message:
//!
//! - the renderer, through a [`SearchHandle`] (text edits, clear, hover, click);
//! - the [`EventBus`] subscription (global keys, pointer-downs);
//! - the [`QueryDebouncer`]'s timer and lookup tasks (generation tagged).
//!
//! The task applies the resulting [`StatePatch`]es and publishes snapshots on
//! a `watch` channel. Unmounting stops the task, aborts the debounce timer
//! and cancels any in-flight lookup, so nothing mutates the state afterwards.

use crate::config::SearchConfig;
use crate::debounce::{DebounceEvent, QueryDebouncer};
use crate::dropdown::{DropdownVisibility, VisibilityTrigger};
use crate::error::Result;
use crate::events::{EventBus, NavKey, PointerTarget, UiEvent};
use crate::lookup::{Lookup, SelectionSink};
use crate::result_list::{ListAction, ResultListController};
use crate::state::{QueryState, StatePatch};
use crate::types::SearchResult;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Input from the widget's own handlers.
#[derive(Debug)]
enum Command {
    TextChanged(String),
    Clear,
    Select(SearchResult),
    Hover(usize),
    Click(usize),
}

/// Cheap, cloneable access to a mounted controller.
///
/// This is what a renderer holds: a way to read [`QueryState`] snapshots and
/// the handler functions it wires to its input element and result rows.
/// Calls made after the controller is unmounted are ignored.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<QueryState>,
}

impl SearchHandle {
    fn send(&self, command: Command) {
        if let Err(mpsc::error::SendError(command)) = self.commands.send(command) {
            trace!(?command, "search controller unmounted, command dropped");
        }
    }

    /// The input's text changed.
    pub fn on_text_change(&self, text: impl Into<String>) {
        self.send(Command::TextChanged(text.into()));
    }

    /// The clear button was pressed.
    pub fn on_clear(&self) {
        self.send(Command::Clear);
    }

    /// Commit `item` as the selection.
    pub fn on_select(&self, item: SearchResult) {
        self.send(Command::Select(item));
    }

    /// The pointer entered result row `index`.
    pub fn on_hover(&self, index: usize) {
        self.send(Command::Hover(index));
    }

    /// Result row `index` was clicked.
    pub fn on_click(&self, index: usize) {
        self.send(Command::Click(index));
    }

    /// Latest published state.
    pub fn state(&self) -> QueryState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.state.clone()
    }

    /// Whether the controller task is still running.
    pub fn is_mounted(&self) -> bool {
        !self.commands.is_closed()
    }
}

/// A mounted search box.
///
/// Dropping the controller stops it as well; [`unmount`](Self::unmount)
/// additionally waits until the task has finished.
pub struct SearchController {
    handle: SearchHandle,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SearchController {
    /// Mount a controller on the current tokio runtime.
    ///
    /// The bus subscription is taken before this returns, so events
    /// published afterwards are never missed. Fails if `config` does not
    /// pass [`SearchConfig::validate`].
    pub fn mount(
        config: SearchConfig,
        lookup: Arc<dyn Lookup>,
        on_select: Arc<dyn SelectionSink>,
        bus: &EventBus,
    ) -> Result<Self> {
        config.validate()?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(QueryState::default());
        let (debouncer, debounce_rx) = QueryDebouncer::channel(config.debounce(), lookup);
        let shutdown = CancellationToken::new();

        debug!(
            debounce_ms = config.debounce_ms,
            escape = ?config.escape,
            "mounting search controller"
        );

        let task = ControllerTask {
            state: state_tx,
            debouncer,
            debounce_rx,
            dropdown: DropdownVisibility::new(config.escape),
            commands: command_rx,
            bus: Some(bus.subscribe()),
            on_select,
            shutdown: shutdown.clone(),
        };

        Ok(Self {
            handle: SearchHandle {
                commands: command_tx,
                state: state_rx,
            },
            shutdown,
            task: Some(tokio::spawn(task.run())),
        })
    }

    /// A handle for the renderer.
    pub fn handle(&self) -> SearchHandle {
        self.handle.clone()
    }

    /// Latest published state.
    pub fn state(&self) -> QueryState {
        self.handle.state()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.handle.subscribe()
    }

    /// Stop the controller and wait for its task to finish.
    pub async fn unmount(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "search controller task ended abnormally");
            }
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// The single writer of [`QueryState`].
struct ControllerTask {
    state: watch::Sender<QueryState>,
    debouncer: QueryDebouncer,
    debounce_rx: mpsc::UnboundedReceiver<DebounceEvent>,
    dropdown: DropdownVisibility,
    commands: mpsc::UnboundedReceiver<Command>,
    bus: Option<broadcast::Receiver<UiEvent>>,
    on_select: Arc<dyn SelectionSink>,
    shutdown: CancellationToken,
}

impl ControllerTask {
    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => break,

                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },

                Some(event) = self.debounce_rx.recv() => self.handle_debounce(event),

                event = next_ui_event(&mut self.bus) => self.handle_ui_event(event),
            }
        }

        self.debouncer.cancel();
        debug!("search controller unmounted");
    }

    fn publish(&self, patches: impl IntoIterator<Item = StatePatch>) {
        self.state.send_if_modified(|state| {
            patches
                .into_iter()
                .fold(false, |changed, patch| state.apply(patch) | changed)
        });
        debug_assert_eq!(
            self.state.borrow().is_open,
            self.dropdown.is_open(),
            "published visibility diverged from the dropdown state machine"
        );
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::TextChanged(text) => self.text_changed(text),
            Command::Clear => self.clear(),
            Command::Select(item) => self.select(item),
            Command::Hover(index) => {
                let action = ResultListController::from_state(&self.state.borrow()).on_hover(index);
                self.apply_list_action(action, None);
            }
            Command::Click(index) => {
                let action = ResultListController::from_state(&self.state.borrow()).on_click(index);
                self.apply_list_action(action, None);
            }
        }
    }

    fn text_changed(&mut self, text: String) {
        let closing = if crate::is_blank(&text) {
            self.dropdown.handle(VisibilityTrigger::TextBlank)
        } else {
            None
        };
        // Re-arming cancels any in-flight lookup, so nothing is loading until the next dispatch
        let edit = StatePatch::default().text(text.clone()).loading(false);
        self.publish([Some(edit), closing].into_iter().flatten());
        self.debouncer.on_text_changed(text);
    }

    fn clear(&mut self) {
        self.debouncer.cancel();
        let closing = self.dropdown.handle(VisibilityTrigger::Clear);
        self.publish(
            [Some(StatePatch::emptied().text("").highlight(None)), closing]
                .into_iter()
                .flatten(),
        );
    }

    fn select(&mut self, item: SearchResult) {
        self.debouncer.cancel();
        let closing = self.dropdown.handle(VisibilityTrigger::Selection);
        self.publish(
            [
                Some(
                    StatePatch::default()
                        .text(item.label.clone())
                        .loading(false)
                        .highlight(None),
                ),
                closing,
            ]
            .into_iter()
            .flatten(),
        );

        debug!(id = %item.id, label = %item.label, "result selected");
        self.on_select.on_select(&item);
    }

    fn apply_list_action(&mut self, action: ListAction, closing: Option<StatePatch>) {
        match action {
            ListAction::Select(item) => self.select(item),
            action => self.publish([action.highlight_patch(), closing].into_iter().flatten()),
        }
    }

    fn handle_debounce(&mut self, event: DebounceEvent) {
        let emission = self.debouncer.handle(event);
        let visibility = emission
            .visibility_trigger()
            .and_then(|trigger| self.dropdown.handle(trigger));
        self.publish([emission.into_patch(), visibility].into_iter().flatten());
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::KeyDown(key) => self.key_down(key),
            UiEvent::PointerDown(PointerTarget::Outside) => {
                let closing = self.dropdown.handle(VisibilityTrigger::OutsidePointerDown);
                self.publish(closing);
            }
            UiEvent::PointerDown(PointerTarget::Widget) => {
                trace!("pointer down inside widget");
            }
        }
    }

    fn key_down(&mut self, key: NavKey) {
        if !self.dropdown.is_open() {
            trace!(?key, "dropdown closed, key ignored");
            return;
        }
        let action = ResultListController::from_state(&self.state.borrow()).on_key(key);
        let closing = match key {
            NavKey::Escape => self.dropdown.handle(VisibilityTrigger::Escape),
            _ => None,
        };
        self.apply_list_action(action, closing);
    }
}

/// Next event from the bus subscription; pends forever once the bus is gone.
async fn next_ui_event(bus: &mut Option<broadcast::Receiver<UiEvent>>) -> UiEvent {
    loop {
        let Some(rx) = bus.as_mut() else {
            return std::future::pending().await;
        };
        match rx.recv().await {
            Ok(event) => return event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "ui event subscription lagged");
            }
            Err(RecvError::Closed) => {
                debug!("ui event bus closed");
                *bus = None;
            }
        }
    }
}
