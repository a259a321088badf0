//! Terminal-side state of the search box and translation of terminal
//! events into controller calls and bus events.

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use smartsearch_core::{EventBus, PointerTarget, QueryState, SearchHandle, SearchResult, UiEvent};
use tracing::debug;

use super::input::{map_key_event, InputAction};
use super::layout::{Hit, Layout};
use super::render::Frame;
use crate::config::{CliConfig, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct SearchApp {
    handle: SearchHandle,
    bus: EventBus,
    /// Text as typed. The controller sees it through `on_text_change`; it is
    /// only overwritten locally on clear and selection.
    input: String,
    placeholder: String,
    theme: Theme,
    status: Option<String>,
    spinner_tick: usize,
    layout: Layout,
    /// Dropdown scroll position, kept across frames
    scroll_top: usize,
}

impl SearchApp {
    pub fn new(handle: SearchHandle, bus: EventBus, config: &CliConfig, layout: Layout) -> Self {
        Self {
            handle,
            bus,
            input: String::new(),
            placeholder: config.placeholder.clone(),
            theme: config.theme,
            status: None,
            spinner_tick: 0,
            layout,
            scroll_top: 0,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Move the dropdown window after a state change, scrolling only when the
    /// highlight would leave it.
    pub fn sync(&mut self, state: &QueryState) {
        self.scroll_top =
            self.layout
                .scroll_top(self.scroll_top, state.results.len(), state.highlighted);
    }

    pub fn frame<'a>(&'a self, state: &'a QueryState) -> Frame<'a> {
        Frame {
            state,
            input: &self.input,
            placeholder: &self.placeholder,
            theme: self.theme,
            spinner_tick: self.spinner_tick,
            status: self.status.as_deref(),
            scroll_top: self.scroll_top,
        }
    }

    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    /// The controller committed `item`.
    pub fn on_selected(&mut self, item: &SearchResult) {
        self.input = item.label.clone();
        self.status = Some(format!("Selected: {}", item.label));
    }

    pub fn on_terminal_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) => return self.on_key(&key),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            Event::Resize(width, height) => self.layout = Layout::new(width, height),
            Event::Paste(text) => {
                self.input.extend(text.chars().filter(|c| !c.is_control()));
                self.text_changed();
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_key(&mut self, key: &KeyEvent) -> Flow {
        match map_key_event(key) {
            InputAction::InsertChar(c) => {
                self.input.push(c);
                self.text_changed();
            }
            InputAction::DeleteChar => {
                if self.input.pop().is_some() {
                    self.text_changed();
                }
            }
            InputAction::Clear => self.clear(),
            InputAction::Navigate(key) => {
                self.bus.publish(UiEvent::KeyDown(key));
            }
            InputAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                debug!(theme = ?self.theme, "theme toggled");
            }
            InputAction::Exit => return Flow::Exit,
            InputAction::None => {}
        }
        Flow::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let state = self.handle.state();
        self.sync(&state);
        let hit = self.layout.hit_test(mouse.column, mouse.row, &state, self.scroll_top);

        match mouse.kind {
            MouseEventKind::Moved => {
                if let Hit::Row(index) = hit {
                    if !state.is_highlighted(index) {
                        self.handle.on_hover(index);
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let target = if hit.is_widget() {
                    PointerTarget::Widget
                } else {
                    PointerTarget::Outside
                };
                self.bus.publish(UiEvent::PointerDown(target));

                match hit {
                    Hit::ClearButton => self.clear(),
                    Hit::Row(index) => self.handle.on_click(index),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn text_changed(&self) {
        self.handle.on_text_change(self.input.clone());
    }

    fn clear(&mut self) {
        self.input.clear();
        self.handle.on_clear();
    }
}
