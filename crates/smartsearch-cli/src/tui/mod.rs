//! Interactive terminal search box.

pub mod app;
pub mod input;
pub mod layout;
pub mod render;
pub mod runner;

pub use app::{Flow, SearchApp};
pub use input::{map_key_event, InputAction};
pub use layout::{Hit, Layout};
pub use runner::run;
