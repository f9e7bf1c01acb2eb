//! Lifecycle events
//!
//! Events are explicit and typed. They are attached to log lines as the
//! `event` field.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Query executor ready
    StoreConnected,
    /// Server startup begins
    ServerStart,
    /// Listener bound, ready to serve
    ServerListening,
    /// A request ended in an internal error
    RequestFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::ServerStart => "SERVER_START",
            Event::ServerListening => "SERVER_LISTENING",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Returns true if this event indicates a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::RequestFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::ServerListening.as_str(), "SERVER_LISTENING");
        assert_eq!(format!("{}", Event::RequestFailed), "REQUEST_FAILED");
    }

    #[test]
    fn test_failure_events() {
        assert!(Event::RequestFailed.is_failure());
        assert!(!Event::ConfigLoaded.is_failure());
    }
}
