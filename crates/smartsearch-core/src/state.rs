//! Observable query state and the patches that mutate it.

use crate::types::SearchResult;
use serde::Serialize;

/// Snapshot of everything a renderer needs to draw the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryState {
    /// Current query text.
    pub text: String,
    /// Results of the most recent settled lookup.
    pub results: Vec<SearchResult>,
    /// Whether the dropdown is visible.
    pub is_open: bool,
    /// Whether the most recent lookup is still in flight.
    pub is_loading: bool,
    /// Row under the keyboard/pointer cursor.
    pub highlighted: Option<usize>,
}

impl QueryState {
    /// Highlighted row as a signed index, `-1` meaning none.
    pub fn highlighted_index(&self) -> isize {
        self.highlighted.map_or(-1, |i| i as isize)
    }

    /// The highlighted result, if any.
    pub fn highlighted_result(&self) -> Option<&SearchResult> {
        self.highlighted.and_then(|i| self.results.get(i))
    }

    /// Whether row `index` is highlighted.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted == Some(index)
    }

    /// Open with nothing to show: render a "No results found" row.
    pub fn shows_empty_state(&self) -> bool {
        self.is_open && self.results.is_empty()
    }

    /// The clear button is hidden while loading and when there is no text.
    pub fn shows_clear_button(&self) -> bool {
        !self.is_loading && !self.text.is_empty()
    }

    /// Apply `patch`, then restore the state invariants.
    ///
    /// Returns whether anything changed.
    pub fn apply(&mut self, patch: StatePatch) -> bool {
        let before = self.clone();

        let results_replaced = patch.results.is_some();
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(results) = patch.results {
            self.results = results;
        }
        if let Some(open) = patch.is_open {
            self.is_open = open;
        }
        if let Some(loading) = patch.is_loading {
            self.is_loading = loading;
        }
        match patch.highlighted {
            Some(highlighted) => self.highlighted = highlighted,
            None if results_replaced => self.highlighted = None,
            None => {}
        }

        if self.highlighted.is_some_and(|i| i >= self.results.len()) {
            self.highlighted = None;
        }
        if crate::is_blank(&self.text) {
            self.is_open = false;
        }

        *self != before
    }
}

/// Partial update to a [`QueryState`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    /// New query text.
    pub text: Option<String>,
    /// New result list; resets the highlight unless one is set explicitly.
    pub results: Option<Vec<SearchResult>>,
    /// New dropdown visibility.
    pub is_open: Option<bool>,
    /// New loading flag.
    pub is_loading: Option<bool>,
    /// New highlight (`Some(None)` clears it).
    pub highlighted: Option<Option<usize>>,
}

impl StatePatch {
    /// Set the query text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replace the result list.
    pub fn results(mut self, results: Vec<SearchResult>) -> Self {
        self.results = Some(results);
        self
    }

    /// Set dropdown visibility.
    pub fn open(mut self, open: bool) -> Self {
        self.is_open = Some(open);
        self
    }

    /// Set the loading flag.
    pub fn loading(mut self, loading: bool) -> Self {
        self.is_loading = Some(loading);
        self
    }

    /// Set or clear the highlight.
    pub fn highlight(mut self, highlighted: Option<usize>) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    /// Results arrived for the current query.
    pub fn settled(results: Vec<SearchResult>) -> Self {
        Self::default().results(results).open(true).loading(false)
    }

    /// Nothing to show: blank query or failed lookup.
    pub fn emptied() -> Self {
        Self::default().results(Vec::new()).open(false).loading(false)
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
