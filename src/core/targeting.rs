use crate::core::{RequestContext, TargetingGroup, TargetingPredicateResult};

/// Evaluates targeting groups against one request context.
pub struct TargetingEvaluator<'a> {
    request_context: &'a RequestContext,
}

impl<'a> TargetingEvaluator<'a> {
    pub fn new(request_context: &'a RequestContext) -> Self {
        Self { request_context }
    }

    /// TRUE iff every predicate in the group is TRUE. A group without
    /// predicates is TRUE. Stops at the first predicate that is not TRUE.
    pub fn evaluate(&self, targeting_group: &TargetingGroup) -> TargetingPredicateResult {
        targeting_group
            .targeting_predicates
            .iter()
            .all(|predicate| predicate.evaluate(self.request_context).is_true())
            .into()
    }
}
