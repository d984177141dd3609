use async_trait::async_trait;

use super::{RightOrder, RightUsageOutcome, RightUsageRequest};
use crate::errors::Result;
use crate::event_log::SecurityChangeEvent;

#[async_trait]
pub trait RightTradingServiceTrait: Send + Sync {
    /// Appends a positive BUY_RIGHT event. Never checks holdings.
    async fn buy_rights(&self, order: RightOrder) -> Result<SecurityChangeEvent>;

    /// Appends a negative SELL_RIGHT event, failing with `InsufficientRights`
    /// when the portfolio holds fewer rights than ordered.
    async fn sell_rights(&self, order: RightOrder) -> Result<SecurityChangeEvent>;
}

#[async_trait]
pub trait RightUsageServiceTrait: Send + Sync {
    /// Burns rights and mints the same quantity of the underlying stock in
    /// one atomic batch.
    async fn use_rights(&self, request: RightUsageRequest) -> Result<RightUsageOutcome>;
}
