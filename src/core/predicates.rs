//! Minimal predicates. Production rules (spend history, membership, age
//! bands, ...) live with the services that own their data and only need to
//! implement [`TargetingPredicate`].

use crate::core::{RequestContext, TargetingPredicate, TargetingPredicateResult};

/// Always answers with the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantPredicate {
    result: TargetingPredicateResult,
}

impl ConstantPredicate {
    pub fn new(result: TargetingPredicateResult) -> Self {
        Self { result }
    }

    pub fn always() -> Self {
        Self::new(TargetingPredicateResult::True)
    }

    pub fn never() -> Self {
        Self::new(TargetingPredicateResult::False)
    }
}

impl TargetingPredicate for ConstantPredicate {
    fn evaluate(&self, _request_context: &RequestContext) -> TargetingPredicateResult {
        self.result
    }
}

/// TRUE when the request carries a non-empty customer id.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecognizedCustomerPredicate;

impl TargetingPredicate for RecognizedCustomerPredicate {
    fn evaluate(&self, request_context: &RequestContext) -> TargetingPredicateResult {
        request_context
            .customer_id()
            .map(|id| !id.trim().is_empty())
            .unwrap_or(false)
            .into()
    }
}

/// Inverts the wrapped predicate's result.
#[derive(Debug, Clone)]
pub struct InversePredicate<P> {
    inner: P,
}

impl<P: TargetingPredicate> InversePredicate<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: TargetingPredicate> TargetingPredicate for InversePredicate<P> {
    fn evaluate(&self, request_context: &RequestContext) -> TargetingPredicateResult {
        self.inner.evaluate(request_context).invert()
    }
}
