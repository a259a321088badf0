//! Trailing-edge debounce of query text with stale-result protection.
//!
//! Every keystroke bumps a generation counter, aborts the previous timer and
//! cancels the previous in-flight lookup. Timer and lookup tasks report back
//! through an mpsc channel tagged with the generation they were started for;
//! anything carrying an older generation is discarded.

use crate::dropdown::VisibilityTrigger;
use crate::error::LookupError;
use crate::lookup::Lookup;
use crate::state::StatePatch;
use crate::types::SearchResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Identifies one debounced request.
pub type Generation = u64;

/// Notification from a timer or lookup task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceEvent {
    /// The quiet period for `generation` elapsed.
    Fired {
        /// Request the timer belongs to.
        generation: Generation,
        /// Query text at the time of the keystroke.
        text: String,
    },
    /// The lookup for `generation` finished.
    Settled {
        /// Request the lookup belongs to.
        generation: Generation,
        /// What the lookup returned.
        outcome: Result<Vec<SearchResult>, LookupError>,
    },
}

/// What the debouncer wants published after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Superseded request; publish nothing.
    Stale,
    /// Blank query; lookup skipped.
    Idle,
    /// Lookup dispatched.
    Loading,
    /// Lookup returned results.
    Settled(Vec<SearchResult>),
    /// Lookup failed.
    Failed,
}

impl Emission {
    /// State change to publish.
    pub fn into_patch(self) -> Option<StatePatch> {
        match self {
            Self::Stale => None,
            Self::Idle | Self::Failed => Some(StatePatch::emptied()),
            Self::Loading => Some(StatePatch::default().loading(true)),
            Self::Settled(results) => Some(StatePatch::settled(results)),
        }
    }

    /// Dropdown input implied by this emission.
    pub fn visibility_trigger(&self) -> Option<VisibilityTrigger> {
        match self {
            Self::Idle => Some(VisibilityTrigger::TextBlank),
            Self::Failed => Some(VisibilityTrigger::LookupFailed),
            Self::Settled(_) => Some(VisibilityTrigger::LookupSettled),
            Self::Stale | Self::Loading => None,
        }
    }
}

/// Owns the pending timer and the in-flight lookup for one search box.
pub struct QueryDebouncer {
    quiet_period: Duration,
    lookup: Arc<dyn Lookup>,
    events: mpsc::UnboundedSender<DebounceEvent>,
    generation: Generation,
    timer: Option<JoinHandle<()>>,
    in_flight: Option<CancellationToken>,
}

impl QueryDebouncer {
    /// Create a debouncer that reports on `events`.
    pub fn new(
        quiet_period: Duration,
        lookup: Arc<dyn Lookup>,
        events: mpsc::UnboundedSender<DebounceEvent>,
    ) -> Self {
        Self {
            quiet_period,
            lookup,
            events,
            generation: 0,
            timer: None,
            in_flight: None,
        }
    }

    /// Create a debouncer together with the receiving end of its channel.
    pub fn channel(
        quiet_period: Duration,
        lookup: Arc<dyn Lookup>,
    ) -> (Self, mpsc::UnboundedReceiver<DebounceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(quiet_period, lookup, tx), rx)
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Configured quiet period.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Whether a timer or lookup is outstanding.
    pub fn is_pending(&self) -> bool {
        self.timer.is_some() || self.in_flight.is_some()
    }

    /// Re-arm the timer for `text`, superseding all earlier work.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> Generation {
        self.cancel();

        let generation = self.generation;
        let text = text.into();
        let events = self.events.clone();
        let quiet_period = self.quiet_period;

        trace!(generation, "debounce timer armed");
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = events.send(DebounceEvent::Fired { generation, text });
        }));
        generation
    }

    /// Quiet period elapsed: skip blank queries, otherwise dispatch the lookup.
    pub fn on_fired(&mut self, generation: Generation, text: String) -> Emission {
        if generation != self.generation {
            debug!(generation, current = self.generation, "ignoring stale debounce timer");
            return Emission::Stale;
        }
        self.timer = None;

        if crate::is_blank(&text) {
            debug!(generation, "blank query, lookup skipped");
            return Emission::Idle;
        }

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let lookup = Arc::clone(&self.lookup);
        let events = self.events.clone();

        debug!(generation, query = %text, "dispatching lookup");
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    trace!(generation, "lookup cancelled before settling");
                }
                outcome = lookup.lookup(&text) => {
                    let _ = events.send(DebounceEvent::Settled { generation, outcome });
                }
            }
        });
        self.in_flight = Some(token);
        Emission::Loading
    }

    /// Lookup finished: apply it only if it belongs to the current generation.
    pub fn on_settled(
        &mut self,
        generation: Generation,
        outcome: Result<Vec<SearchResult>, LookupError>,
    ) -> Emission {
        if generation != self.generation {
            debug!(generation, current = self.generation, "discarding stale lookup result");
            return Emission::Stale;
        }
        self.in_flight = None;

        match outcome {
            Ok(results) => {
                debug!(generation, count = results.len(), "lookup settled");
                Emission::Settled(results)
            }
            Err(e) => {
                warn!(generation, error = %e, "lookup failed, clearing results");
                Emission::Failed
            }
        }
    }

    /// Dispatch a [`DebounceEvent`] to [`on_fired`](Self::on_fired) or
    /// [`on_settled`](Self::on_settled).
    pub fn handle(&mut self, event: DebounceEvent) -> Emission {
        match event {
            DebounceEvent::Fired { generation, text } => self.on_fired(generation, text),
            DebounceEvent::Settled {
                generation,
                outcome,
            } => self.on_settled(generation, outcome),
        }
    }

    /// Abort the timer, cancel the in-flight lookup and invalidate anything
    /// already queued. Returns whether there was outstanding work.
    pub fn cancel(&mut self) -> bool {
        let mut had_work = false;
        if let Some(timer) = self.timer.take() {
            timer.abort();
            had_work = true;
        }
        if let Some(token) = self.in_flight.take() {
            token.cancel();
            had_work = true;
        }
        self.generation += 1;
        had_work
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
