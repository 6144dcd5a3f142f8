//! Unified recent-activity feed.

pub mod aggregator;
pub mod mapper;
pub mod source;

pub use aggregator::ActivityAggregator;
pub use source::{ActivitySource, RepositoryActivitySource};
