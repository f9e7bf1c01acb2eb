//! Observability for newsdesk
//!
//! Structured logging through `tracing`, plus the typed lifecycle events
//! attached to log lines.
//!
//! # Usage
//!
//! ```ignore
//! use newsdesk::observability::{init_logging, Event, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default());
//! tracing::info!(event = %Event::ServerStart, "starting");
//! ```

mod events;
mod logging;

pub use events::Event;
pub use logging::{init_logging, LogFormat, LoggingConfig};
