//! Screen geometry and pointer hit testing.
//!
//! ```text
//! row 0   Smart Search                         Ctrl-T theme  Ctrl-Q quit
//! row 1   Search for accounts, customers, transactions, and more
//! row 3   > query text                                          [x]
//! row 4+  result rows (or "No results found")
//! last    status line
//! ```

use smartsearch_core::QueryState;
use std::ops::Range;

/// Left and right margin around the search box
pub const MARGIN: u16 = 2;

/// Width reserved at the right end of the input for the spinner or `[x]`
pub const INPUT_ADORNMENT_WIDTH: u16 = 4;

const TITLE_ROW: u16 = 0;
const SUBTITLE_ROW: u16 = 1;
const INPUT_ROW: u16 = 3;
const DROPDOWN_TOP: u16 = 4;

/// What a pointer position lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Input,
    ClearButton,
    /// Result row, by index into `QueryState::results`
    Row(usize),
    /// The "No results found" row
    EmptyState,
    Outside,
}

impl Hit {
    /// Whether the position is part of the search widget.
    pub fn is_widget(self) -> bool {
        self != Self::Outside
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn title_row(&self) -> u16 {
        TITLE_ROW
    }

    pub fn subtitle_row(&self) -> u16 {
        SUBTITLE_ROW
    }

    pub fn input_row(&self) -> u16 {
        INPUT_ROW
    }

    pub fn dropdown_top(&self) -> u16 {
        DROPDOWN_TOP
    }

    pub fn status_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    /// Columns covered by the input and dropdown.
    pub fn box_columns(&self) -> Range<u16> {
        MARGIN..self.width.saturating_sub(MARGIN).max(MARGIN)
    }

    pub fn box_width(&self) -> usize {
        self.box_columns().len()
    }

    /// Columns of the `[x]` button at the right end of the input.
    pub fn clear_button(&self) -> Range<u16> {
        let end = self.box_columns().end;
        end.saturating_sub(INPUT_ADORNMENT_WIDTH)..end.saturating_sub(1)
    }

    /// Result rows that fit between the input and the status line.
    pub fn dropdown_capacity(&self) -> usize {
        // one blank row above the status line
        usize::from(self.status_row().saturating_sub(DROPDOWN_TOP + 1)).max(1)
    }

    /// First result row to show, moving the previous window only as far as
    /// needed to keep the highlight visible. No highlight resets to the top.
    pub fn scroll_top(&self, previous: usize, len: usize, highlighted: Option<usize>) -> usize {
        let capacity = self.dropdown_capacity();
        let Some(i) = highlighted else {
            return 0;
        };
        let top = previous.min(len.saturating_sub(capacity));
        if i < top {
            i
        } else if i >= top + capacity {
            i + 1 - capacity
        } else {
            top
        }
    }

    /// Slice of the results shown when the window starts at `top`.
    pub fn visible_range(&self, top: usize, len: usize) -> Range<usize> {
        top.min(len)..len.min(top + self.dropdown_capacity())
    }

    /// What the pointer lands on, with the dropdown scrolled to `top`.
    pub fn hit_test(&self, column: u16, row: u16, state: &QueryState, top: usize) -> Hit {
        if !self.box_columns().contains(&column) {
            return Hit::Outside;
        }

        if row == INPUT_ROW {
            if state.shows_clear_button() && self.clear_button().contains(&column) {
                return Hit::ClearButton;
            }
            return Hit::Input;
        }

        if !state.is_open || row < DROPDOWN_TOP {
            return Hit::Outside;
        }

        let offset = usize::from(row - DROPDOWN_TOP);
        if state.results.is_empty() {
            return if offset == 0 { Hit::EmptyState } else { Hit::Outside };
        }

        let visible = self.visible_range(top, state.results.len());
        if offset < visible.len() {
            Hit::Row(visible.start + offset)
        } else {
            Hit::Outside
        }
    }
}
