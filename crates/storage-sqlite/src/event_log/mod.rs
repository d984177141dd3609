mod model;
mod repository;


pub use model::{NewSecurityChangeDB, SecurityChangeDB};
pub use repository::EventLogRepository;
