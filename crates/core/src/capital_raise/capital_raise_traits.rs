use async_trait::async_trait;

use super::CapitalRaiseAnnouncement;
use crate::errors::Result;
use crate::event_log::SecurityChangeEvent;

#[async_trait]
pub trait CapitalRaiseServiceTrait: Send + Sync {
    /// Grants rights to every current holder of the announced stock and
    /// returns the appended grant events (possibly none).
    ///
    /// Re-processing the same announcement grants again; callers that need
    /// at-most-once semantics must check `reference` themselves.
    async fn process_announcement(
        &self,
        announcement: CapitalRaiseAnnouncement,
    ) -> Result<Vec<SecurityChangeEvent>>;
}
