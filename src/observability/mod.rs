//! Observability for the board
//!
//! Structured one-line JSON logs named by a typed [`Event`]. Logging never
//! fails the operation being logged.
//!
//! ```ignore
//! use topicboard::observability::{log_event_with_fields, Event, Severity};
//!
//! log_event_with_fields(Severity::Info, Event::TopicAdded, &[("topic", "Tech")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event without fields
pub fn log_event(severity: Severity, event: Event) {
    Logger::log(severity, event.as_str(), &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}
