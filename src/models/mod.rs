//! Data models for the events server

pub mod date_format;
pub mod event;
pub mod filter;

// Re-export commonly used types
pub use event::{Event, EventDto};
pub use filter::{EventFilter, EventFilterQuery};
