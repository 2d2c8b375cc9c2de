pub mod predicates;
pub mod ranking;
pub mod selection;
pub mod targeting;

pub use crate::domain::model::{
    AdvertisementContent, GeneratedAdvertisement, RequestContext, TargetingGroup,
    TargetingPredicateResult,
};
pub use crate::domain::ports::{ReadableDao, TargetingPredicate};
pub use crate::utils::error::Result;
