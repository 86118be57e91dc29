//! State operations, split by component. Each file adds methods to
//! `AppState`; they share the one owned state and never reach for globals.

pub mod mood_log;
pub mod tasks;
pub mod timer;

pub use tasks::filtered_view;
pub use timer::{StoppedTimer, TimerEvent};
