//! Open/closed state machine for the result dropdown.

use crate::config::EscapeBehavior;
use crate::state::StatePatch;
use tracing::debug;

/// Dropdown visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Hidden. Initial state.
    #[default]
    Closed,
    /// Showing results or the empty-state row.
    Open,
}

impl Visibility {
    /// Whether the dropdown is visible.
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// Inputs that can change visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityTrigger {
    /// The current, non-blank query's lookup returned (possibly zero) results.
    LookupSettled,
    /// The current query's lookup failed.
    LookupFailed,
    /// The query became empty or whitespace-only.
    TextBlank,
    /// A pointer went down outside the widget.
    OutsidePointerDown,
    /// A result was committed.
    Selection,
    /// The query was cleared.
    Clear,
    /// Escape was pressed.
    Escape,
}

/// Dropdown state machine. Long-lived; there is no terminal state.
#[derive(Debug, Clone, Copy)]
pub struct DropdownVisibility {
    state: Visibility,
    escape: EscapeBehavior,
}

impl DropdownVisibility {
    /// Start closed, applying `escape` to Escape presses.
    pub fn new(escape: EscapeBehavior) -> Self {
        Self {
            state: Visibility::Closed,
            escape,
        }
    }

    /// Current state.
    pub fn state(&self) -> Visibility {
        self.state
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The state `trigger` would lead to.
    pub fn next_state(&self, trigger: VisibilityTrigger) -> Visibility {
        match trigger {
            VisibilityTrigger::LookupSettled => Visibility::Open,
            VisibilityTrigger::Escape => match self.escape {
                EscapeBehavior::Close => Visibility::Closed,
                EscapeBehavior::Unhighlight => self.state,
            },
            VisibilityTrigger::LookupFailed
            | VisibilityTrigger::TextBlank
            | VisibilityTrigger::OutsidePointerDown
            | VisibilityTrigger::Selection
            | VisibilityTrigger::Clear => Visibility::Closed,
        }
    }

    /// Apply `trigger`. Returns the state change to publish, if any.
    ///
    /// Closing also clears the highlight.
    pub fn handle(&mut self, trigger: VisibilityTrigger) -> Option<StatePatch> {
        let next = self.next_state(trigger);
        if next == self.state {
            return None;
        }
        debug!(from = ?self.state, to = ?next, ?trigger, "dropdown transition");
        self.state = next;

        let patch = StatePatch::default().open(next.is_open());
        Some(match next {
            Visibility::Open => patch,
            Visibility::Closed => patch.highlight(None),
        })
    }
}

impl Default for DropdownVisibility {
    fn default() -> Self {
        Self::new(EscapeBehavior::default())
    }
}
