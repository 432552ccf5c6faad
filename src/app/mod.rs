//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! The mark overlay is the one piece that lives outside the pure update
//! cycle: the event loop owns a [`SessionController`](crate::session::SessionController)
//! and routes keystrokes to it while a session is active.

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{FILE_BUFFER, HELP_BUFFER, MarkEntry, Model, OverlaySurface, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::OverlayConfig;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    config: OverlayConfig,
}

impl App {
    /// Create a new application for the given file.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            config: OverlayConfig::default(),
        }
    }

    /// Use a resolved overlay configuration.
    pub fn with_config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }
}

#[cfg(test)]
mod tests;
