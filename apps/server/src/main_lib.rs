use std::sync::Arc;

use crate::config::{Config, LogFormat, StorageBackend};
use rightsbook_core::{
    capital_raise::{AnnouncementConsumer, CapitalRaiseService, CapitalRaiseServiceTrait},
    event_log::{EventLogRepositoryTrait, InMemoryEventLog},
    holdings::{AdjustmentService, AdjustmentServiceTrait, HoldingsService, HoldingsServiceTrait},
    rights::{
        RightTradingService, RightTradingServiceTrait, RightUsageService, RightUsageServiceTrait,
    },
    securities::{InMemorySecurityRegistry, SecurityRegistryTrait},
    utils::PortfolioLocks,
};
use rightsbook_storage_sqlite::{db, EventLogRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub event_log: Arc<dyn EventLogRepositoryTrait>,
    pub security_registry: Arc<InMemorySecurityRegistry>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait>,
    pub adjustment_service: Arc<dyn AdjustmentServiceTrait>,
    pub announcement_consumer: Arc<AnnouncementConsumer>,
    pub right_trading_service: Arc<dyn RightTradingServiceTrait>,
    pub right_usage_service: Arc<dyn RightUsageServiceTrait>,
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded into it.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()?,
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()?,
    }
    Ok(())
}

fn build_event_log(config: &Config) -> anyhow::Result<Arc<dyn EventLogRepositoryTrait>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory event log");
            Ok(Arc::new(InMemoryEventLog::new()))
        }
        StorageBackend::Sqlite => {
            let (pool, writer) = db::open(&config.db_path)?;
            tracing::info!("Database path in use: {}", config.db_path);
            Ok(Arc::new(EventLogRepository::new(pool, writer)))
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let event_log = build_event_log(config)?;
    let security_registry = Arc::new(InMemorySecurityRegistry::new());
    let securities: Arc<dyn SecurityRegistryTrait> = security_registry.clone();
    let locks = Arc::new(PortfolioLocks::new());

    let holdings_service: Arc<dyn HoldingsServiceTrait> =
        Arc::new(HoldingsService::new(event_log.clone()));
    let adjustment_service: Arc<dyn AdjustmentServiceTrait> = Arc::new(AdjustmentService::new(
        event_log.clone(),
        securities.clone(),
        locks.clone(),
    ));
    let capital_raise_service: Arc<dyn CapitalRaiseServiceTrait> =
        Arc::new(CapitalRaiseService::new(
            event_log.clone(),
            holdings_service.clone(),
            securities.clone(),
            locks.clone(),
        ));
    let announcement_consumer = Arc::new(AnnouncementConsumer::new(capital_raise_service));
    let right_trading_service: Arc<dyn RightTradingServiceTrait> =
        Arc::new(RightTradingService::new(
            event_log.clone(),
            holdings_service.clone(),
            securities.clone(),
            locks.clone(),
        ));
    let right_usage_service: Arc<dyn RightUsageServiceTrait> = Arc::new(RightUsageService::new(
        event_log.clone(),
        holdings_service.clone(),
        securities,
        locks,
    ));

    Ok(Arc::new(AppState {
        event_log,
        security_registry,
        holdings_service,
        adjustment_service,
        announcement_consumer,
        right_trading_service,
        right_usage_service,
    }))
}
