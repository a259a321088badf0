//! Keyboard and pointer navigation over the result list.

use crate::events::NavKey;
use crate::state::{QueryState, StatePatch};
use crate::types::SearchResult;
use tracing::trace;

/// Outcome of a navigation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Move (or clear) the highlight.
    Highlight(Option<usize>),
    /// Commit this result.
    Select(SearchResult),
    /// Nothing to do.
    Ignored,
}

impl ListAction {
    /// State change for a highlight move; `None` for selections and no-ops.
    pub fn highlight_patch(&self) -> Option<StatePatch> {
        match self {
            Self::Highlight(index) => Some(StatePatch::default().highlight(*index)),
            _ => None,
        }
    }
}

/// Cursor logic over a borrowed result slice.
///
/// Mouse and keyboard share one cursor: hovering a row moves the same
/// highlight that the arrow keys move.
#[derive(Debug, Clone, Copy)]
pub struct ResultListController<'a> {
    results: &'a [SearchResult],
    highlighted: Option<usize>,
}

impl<'a> ResultListController<'a> {
    /// View over `results` with the given cursor.
    pub fn new(results: &'a [SearchResult], highlighted: Option<usize>) -> Self {
        Self {
            results,
            highlighted: highlighted.filter(|&i| i < results.len()),
        }
    }

    /// View over the results and cursor of `state`.
    pub fn from_state(state: &'a QueryState) -> Self {
        Self::new(&state.results, state.highlighted)
    }

    /// Translate a key press.
    pub fn on_key(&self, key: NavKey) -> ListAction {
        let len = self.results.len();
        let action = match key {
            NavKey::ArrowDown if len > 0 => {
                ListAction::Highlight(Some(self.highlighted.map_or(0, |i| (i + 1) % len)))
            }
            NavKey::ArrowUp if len > 0 => ListAction::Highlight(Some(match self.highlighted {
                None | Some(0) => len - 1,
                Some(i) => i - 1,
            })),
            NavKey::Enter => match self.highlighted {
                Some(i) => ListAction::Select(self.results[i].clone()),
                None => ListAction::Ignored,
            },
            NavKey::Escape => ListAction::Highlight(None),
            NavKey::ArrowDown | NavKey::ArrowUp => ListAction::Ignored,
        };
        if action == ListAction::Ignored {
            trace!(?key, len, "navigation key ignored");
        }
        action
    }

    /// Pointer moved over row `index`.
    pub fn on_hover(&self, index: usize) -> ListAction {
        if index < self.results.len() {
            ListAction::Highlight(Some(index))
        } else {
            ListAction::Ignored
        }
    }

    /// Pointer clicked row `index`; same as Enter with that row highlighted.
    pub fn on_click(&self, index: usize) -> ListAction {
        match self.results.get(index) {
            Some(result) => ListAction::Select(result.clone()),
            None => ListAction::Ignored,
        }
    }
}
