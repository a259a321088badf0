//! # smartsearch-core
//!
//! Headless controller for an autocomplete search box: free-text input is
//! debounced, handed to an injected asynchronous [`Lookup`], and the results
//! are exposed as a navigable list that can be committed with the keyboard or
//! the pointer.
//!
//! ## Architecture
//!
//! ```text
//!  SearchHandle ──commands──┐
//!                           ▼
//!  EventBus ──UiEvent──▶ controller task ──watch──▶ QueryState snapshots
//!                        │      ▲
//!                 spawns │      │ DebounceEvent (generation tagged)
//!                        ▼      │
//!                 timer task / lookup task
//! ```
//!
//! A single tokio task owns [`QueryState`] and is its only writer. The
//! [`QueryDebouncer`], [`ResultListController`] and [`DropdownVisibility`]
//! components never touch the state directly; they produce [`StatePatch`]es
//! that the controller applies and publishes.
//!
//! ## Example
//!
//! ```no_run
//! use smartsearch_core::{lookup_fn, EventBus, SearchConfig, SearchController, SearchResult};
//! use std::sync::Arc;
//!
//! # async fn example() -> smartsearch_core::Result<()> {
//! let lookup = lookup_fn(|query: String| async move {
//!     Ok(vec![SearchResult::new("1", format!("{query} result"))])
//! });
//! let bus = EventBus::default();
//! let controller = SearchController::mount(
//!     SearchConfig::default(),
//!     lookup,
//!     Arc::new(|item: &SearchResult| println!("selected {}", item.label)),
//!     &bus,
//! )?;
//!
//! let handle = controller.handle();
//! handle.on_text_change("acc");
//! let mut states = handle.subscribe();
//! let _ = states.wait_for(|s| s.is_open).await;
//! controller.unmount().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod debounce;
pub mod dropdown;
pub mod error;
pub mod events;
pub mod lookup;
pub mod result_list;
pub mod state;
pub mod types;

pub use config::{EscapeBehavior, SearchConfig};
pub use controller::{SearchController, SearchHandle};
pub use debounce::{DebounceEvent, Emission, Generation, QueryDebouncer};
pub use dropdown::{DropdownVisibility, Visibility, VisibilityTrigger};
pub use error::{LookupError, Result, SearchError};
pub use events::{EventBus, NavKey, PointerTarget, UiEvent};
pub use lookup::{lookup_fn, FnLookup, Lookup, NoopSelection, SelectionSink, TimeoutLookup};
pub use result_list::{ListAction, ResultListController};
pub use state::{QueryState, StatePatch};
pub use types::{Category, SearchResult};

/// Returns true when `text` is empty or whitespace-only.
///
/// Blank text never triggers a lookup and always keeps the dropdown closed.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
