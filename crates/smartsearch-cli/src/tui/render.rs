//! Draws the search box with crossterm commands.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use smartsearch_core::QueryState;
use std::io::{self, Write};

use super::layout::{Layout, INPUT_ADORNMENT_WIDTH};
use crate::config::Theme;

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const TITLE: &str = "Smart Search";
const SUBTITLE: &str = "Search for accounts, customers, transactions, and more";
const HINT: &str = "Up/Down navigate · Enter select · Esc close · Ctrl-U clear";
const EMPTY_STATE: &str = "No results found";

struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
    highlight_fg: Color,
    highlight_bg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGrey,
                accent: Color::DarkBlue,
                highlight_fg: Color::White,
                highlight_bg: Color::DarkBlue,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Grey,
                accent: Color::Cyan,
                highlight_fg: Color::Black,
                highlight_bg: Color::Cyan,
            },
        }
    }
}

/// Everything needed to draw one frame.
pub struct Frame<'a> {
    pub state: &'a QueryState,
    /// Text as typed; may be ahead of `state.text`
    pub input: &'a str,
    pub placeholder: &'a str,
    pub theme: Theme,
    pub spinner_tick: usize,
    pub status: Option<&'a str>,
    /// First result row shown in the dropdown
    pub scroll_top: usize,
}

/// Truncate `text` to `width` characters, marking the cut with an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// One dropdown line: label, then the description if it fits.
pub fn result_line(label: &str, description: Option<&str>, width: usize) -> String {
    match description {
        Some(description) if !description.is_empty() => {
            fit(&format!("{label}  {description}"), width)
        }
        _ => fit(label, width),
    }
}

pub fn draw(out: &mut impl Write, layout: &Layout, frame: &Frame<'_>) -> io::Result<()> {
    let palette = Palette::for_theme(frame.theme);
    let left = layout.box_columns().start;
    let width = layout.box_width();

    queue!(
        out,
        Hide,
        SetBackgroundColor(palette.background),
        Clear(ClearType::All),
    )?;

    queue!(
        out,
        MoveTo(left, layout.title_row()),
        SetForegroundColor(palette.accent),
        SetAttribute(Attribute::Bold),
        Print(fit(TITLE, width)),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(palette.background),
        MoveTo(left, layout.subtitle_row()),
        SetForegroundColor(palette.muted),
        Print(fit(SUBTITLE, width)),
    )?;

    draw_input(out, layout, frame, &palette)?;

    if frame.state.is_open {
        draw_dropdown(out, layout, frame.state, frame.scroll_top, &palette)?;
    }

    let status = frame.status.unwrap_or(HINT);
    queue!(
        out,
        MoveTo(left, layout.status_row()),
        SetForegroundColor(if frame.status.is_some() { palette.accent } else { palette.muted }),
        Print(fit(status, width)),
    )?;

    // Park the cursor after the typed text
    let cursor_col = left + 2 + frame.input.chars().count().min(width.saturating_sub(6)) as u16;
    queue!(out, ResetColor, MoveTo(cursor_col, layout.input_row()), Show)?;
    out.flush()
}

fn draw_input(
    out: &mut impl Write,
    layout: &Layout,
    frame: &Frame<'_>,
    palette: &Palette,
) -> io::Result<()> {
    let left = layout.box_columns().start;
    let text_width = layout
        .box_width()
        .saturating_sub(2 + usize::from(INPUT_ADORNMENT_WIDTH));

    queue!(
        out,
        MoveTo(left, layout.input_row()),
        SetForegroundColor(palette.accent),
        Print("> "),
    )?;

    if frame.input.is_empty() {
        queue!(
            out,
            SetForegroundColor(palette.muted),
            Print(fit(frame.placeholder, text_width)),
        )?;
    } else {
        queue!(
            out,
            SetForegroundColor(palette.text),
            Print(fit(frame.input, text_width)),
        )?;
    }

    let adornment = if frame.state.is_loading {
        Some(SPINNER_FRAMES[frame.spinner_tick % SPINNER_FRAMES.len()].to_string())
    } else if frame.state.shows_clear_button() {
        Some("[x]".to_string())
    } else {
        None
    };
    if let Some(adornment) = adornment {
        queue!(
            out,
            MoveTo(layout.clear_button().start, layout.input_row()),
            SetForegroundColor(palette.muted),
            Print(adornment),
        )?;
    }
    Ok(())
}

fn draw_dropdown(
    out: &mut impl Write,
    layout: &Layout,
    state: &QueryState,
    scroll_top: usize,
    palette: &Palette,
) -> io::Result<()> {
    let left = layout.box_columns().start;
    let width = layout.box_width();
    let top = layout.dropdown_top();

    if state.results.is_empty() {
        return queue!(
            out,
            MoveTo(left, top),
            SetForegroundColor(palette.muted),
            Print(fit(EMPTY_STATE, width)),
        );
    }

    let visible = layout.visible_range(scroll_top, state.results.len());
    for (row, index) in visible.enumerate() {
        let result = &state.results[index];
        let line = result_line(&result.label, result.description.as_deref(), width);
        let line = format!("{line:<width$}");
        let y = top + row as u16;

        if state.is_highlighted(index) {
            queue!(
                out,
                MoveTo(left, y),
                SetBackgroundColor(palette.highlight_bg),
                SetForegroundColor(palette.highlight_fg),
                Print(line),
                SetBackgroundColor(palette.background),
            )?;
        } else {
            queue!(
                out,
                MoveTo(left, y),
                SetForegroundColor(palette.text),
                Print(line),
            )?;
        }
    }
    Ok(())
}
