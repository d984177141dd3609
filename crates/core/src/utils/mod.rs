pub mod portfolio_locks;

pub use portfolio_locks::PortfolioLocks;
