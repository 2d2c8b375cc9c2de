pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{InMemoryContentDao, InMemoryTargetingGroupDao};
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::CatalogConfig;
pub use core::selection::{SelectionEngine, SelectionStrategy};
pub use domain::model::{
    AdvertisementContent, GeneratedAdvertisement, RequestContext, TargetingGroup,
    TargetingPredicateResult,
};
pub use domain::ports::{ReadableDao, TargetingPredicate};
pub use utils::error::{AdError, Result};
