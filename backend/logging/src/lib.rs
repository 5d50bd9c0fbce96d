//! Structured logging for the cookbook app.
//!
//! Console plus daily-rolling NDJSON output, and a typed session event log.

pub mod event_logger;
pub mod logger;

pub use event_logger::{EventLogEntry, EventLogger, SessionEvent};
pub use logger::{LogTarget, init_logger};
