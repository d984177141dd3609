//! Capital raise module - announcements, entitlement and rights grants.

mod announcement_consumer;
mod announcement_parser;
mod capital_raise_model;
mod capital_raise_service;
mod capital_raise_traits;


pub use announcement_consumer::AnnouncementConsumer;
pub use announcement_parser::{parse_announcement, CAPITAL_RAISE_VERB};
pub use capital_raise_model::{compute_entitlement, CapitalRaiseAnnouncement};
pub use capital_raise_service::CapitalRaiseService;
pub use capital_raise_traits::CapitalRaiseServiceTrait;
