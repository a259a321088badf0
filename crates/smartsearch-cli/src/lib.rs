//! smartsearch CLI library
//!
//! Terminal front-end for `smartsearch-core`: configuration, logging, the
//! demo banking catalog, the one-shot `lookup` command and the interactive
//! search box.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;
