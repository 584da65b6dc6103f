//! NoteHub TUI library exports.

pub mod api_client;
pub mod browser;
pub mod cli;
pub mod config;
pub mod creator;
pub mod debounce;
pub mod error;
pub mod events;
pub mod keys;
pub mod nav;
pub mod notifications;
pub mod persistence;
pub mod state;
pub mod tasks;
pub mod telemetry;
pub mod theme;
pub mod views;
pub mod widgets;
