use log::{info, warn};
use std::sync::Arc;

use super::{parse_announcement, CapitalRaiseServiceTrait};
use crate::errors::Result;
use crate::event_log::SecurityChangeEvent;

/// Turns raw announcement payloads into capital raise runs.
///
/// Any transport (message bus listener, HTTP handler) hands its payload and
/// message id here. Malformed payloads are rejected before the service runs.
pub struct AnnouncementConsumer {
    capital_raise_service: Arc<dyn CapitalRaiseServiceTrait>,
}

impl AnnouncementConsumer {
    pub fn new(capital_raise_service: Arc<dyn CapitalRaiseServiceTrait>) -> Self {
        Self {
            capital_raise_service,
        }
    }

    pub async fn consume(
        &self,
        payload: &str,
        message_id: Option<String>,
    ) -> Result<Vec<SecurityChangeEvent>> {
        let announcement = match parse_announcement(payload) {
            Ok(announcement) => announcement.with_reference(message_id),
            Err(e) => {
                warn!("Invalid capital raise message {:?}: {}", payload, e);
                return Err(e);
            }
        };
        let grants = self
            .capital_raise_service
            .process_announcement(announcement)
            .await?;
        info!("Processed capital raise: {}", payload.trim());
        Ok(grants)
    }
}
