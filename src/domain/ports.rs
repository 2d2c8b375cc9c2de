use crate::domain::model::{RequestContext, TargetingPredicateResult};
use crate::utils::error::Result;
use std::fmt::Debug;

/// A single eligibility rule. Implementations must not have side effects
/// visible to the caller; they may consult external data.
pub trait TargetingPredicate: Debug + Send + Sync {
    fn evaluate(&self, request_context: &RequestContext) -> TargetingPredicateResult;
}

/// Read-only keyed lookup. An unknown key yields an empty list, not an error;
/// `Err` is reserved for the backing store failing.
pub trait ReadableDao<K: ?Sized, V>: Send + Sync {
    fn get(&self, key: &K) -> Result<Vec<V>>;
}
