//! Daily productivity hub: a task list with per-task focus timers, a
//! one-entry-per-day mood log, and progress analytics over both.
//!
//! All state lives in one owned [`app::AppState`]. Writes go through
//! [`command::dispatch`] (or a [`session::Session`], which also persists),
//! and every operation takes its timestamp explicitly.

pub mod app;
pub mod calendar;
pub mod clock;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod logging;
pub mod persistence;
pub mod report;
pub mod session;
pub mod store;
pub mod ticker;
pub mod ui;

pub use app::AppState;
pub use command::{dispatch, Command, Outcome};
pub use error::{HubError, HubResult};
pub use session::Session;
