//! Event log module - the append-only store of security change events.

mod event_description;
mod event_log_model;
mod event_log_traits;
mod in_memory_event_log;



pub use event_description::describe_event;
pub use event_log_model::{ActionType, SecurityChangeEvent};
pub use event_log_traits::EventLogRepositoryTrait;
pub use in_memory_event_log::InMemoryEventLog;
