use crate::domain::ports::TargetingPredicate;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Who is asking and where the advertisement will be rendered.
///
/// Built once per selection call and dropped when the call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    customer_id: Option<String>,
    marketplace_id: String,
}

impl RequestContext {
    pub fn new(customer_id: Option<&str>, marketplace_id: &str) -> Self {
        Self {
            customer_id: customer_id.map(str::to_string),
            marketplace_id: marketplace_id.to_string(),
        }
    }

    /// The customer id, if one was supplied. An empty string is passed
    /// through as given.
    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisementContent {
    pub content_id: String,
    pub marketplace_id: String,
    pub renderable_content: String,
}

impl AdvertisementContent {
    pub fn new(
        content_id: impl Into<String>,
        marketplace_id: impl Into<String>,
        renderable_content: impl Into<String>,
    ) -> Self {
        Self {
            content_id: content_id.into(),
            marketplace_id: marketplace_id.into(),
            renderable_content: renderable_content.into(),
        }
    }
}

/// A bundle of predicates that, when all of them hold, makes its content
/// eligible. Several groups may point at the same content.
#[derive(Clone)]
pub struct TargetingGroup {
    pub targeting_group_id: String,
    pub content_id: String,
    pub click_through_rate: f64,
    pub targeting_predicates: Vec<Arc<dyn TargetingPredicate>>,
}

impl TargetingGroup {
    pub fn new(
        targeting_group_id: impl Into<String>,
        content_id: impl Into<String>,
        click_through_rate: f64,
    ) -> Self {
        Self {
            targeting_group_id: targeting_group_id.into(),
            content_id: content_id.into(),
            click_through_rate,
            targeting_predicates: Vec::new(),
        }
    }

    pub fn with_predicate<P: TargetingPredicate + 'static>(mut self, predicate: P) -> Self {
        self.targeting_predicates.push(Arc::new(predicate));
        self
    }
}

impl fmt::Debug for TargetingGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetingGroup")
            .field("targeting_group_id", &self.targeting_group_id)
            .field("content_id", &self.content_id)
            .field("click_through_rate", &self.click_through_rate)
            .field("targeting_predicates", &self.targeting_predicates.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetingPredicateResult {
    True,
    False,
    /// The predicate could not decide, e.g. its backing data was unavailable.
    Indeterminate,
}

impl TargetingPredicateResult {
    pub fn is_true(self) -> bool {
        self == TargetingPredicateResult::True
    }

    /// Swaps TRUE and FALSE; INDETERMINATE stays INDETERMINATE.
    pub fn invert(self) -> Self {
        match self {
            TargetingPredicateResult::True => TargetingPredicateResult::False,
            TargetingPredicateResult::False => TargetingPredicateResult::True,
            TargetingPredicateResult::Indeterminate => TargetingPredicateResult::Indeterminate,
        }
    }
}

impl From<bool> for TargetingPredicateResult {
    fn from(value: bool) -> Self {
        if value {
            TargetingPredicateResult::True
        } else {
            TargetingPredicateResult::False
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedAdvertisement {
    Selected {
        id: Uuid,
        content: AdvertisementContent,
    },
    Empty,
}

impl GeneratedAdvertisement {
    pub fn new(id: Uuid, content: AdvertisementContent) -> Self {
        GeneratedAdvertisement::Selected { id, content }
    }

    pub fn empty() -> Self {
        GeneratedAdvertisement::Empty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GeneratedAdvertisement::Empty)
    }

    pub fn content(&self) -> Option<&AdvertisementContent> {
        match self {
            GeneratedAdvertisement::Selected { content, .. } => Some(content),
            GeneratedAdvertisement::Empty => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
