use crate::core::{AdvertisementContent, ReadableDao, TargetingGroup};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Advertisement content keyed by marketplace id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentDao {
    by_marketplace: HashMap<String, Vec<AdvertisementContent>>,
}

impl InMemoryContentDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, content: AdvertisementContent) {
        self.by_marketplace
            .entry(content.marketplace_id.clone())
            .or_default()
            .push(content);
    }

    pub fn len(&self) -> usize {
        self.by_marketplace.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<AdvertisementContent> for InMemoryContentDao {
    fn from_iter<I: IntoIterator<Item = AdvertisementContent>>(iter: I) -> Self {
        let mut dao = Self::new();
        for content in iter {
            dao.insert(content);
        }
        dao
    }
}

impl ReadableDao<str, AdvertisementContent> for InMemoryContentDao {
    fn get(&self, marketplace_id: &str) -> Result<Vec<AdvertisementContent>> {
        Ok(self
            .by_marketplace
            .get(marketplace_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Targeting groups keyed by content id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTargetingGroupDao {
    by_content: HashMap<String, Vec<TargetingGroup>>,
}

impl InMemoryTargetingGroupDao {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: TargetingGroup) {
        self.by_content
            .entry(group.content_id.clone())
            .or_default()
            .push(group);
    }

    pub fn len(&self) -> usize {
        self.by_content.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<TargetingGroup> for InMemoryTargetingGroupDao {
    fn from_iter<I: IntoIterator<Item = TargetingGroup>>(iter: I) -> Self {
        let mut dao = Self::new();
        for group in iter {
            dao.insert(group);
        }
        dao
    }
}

impl ReadableDao<str, TargetingGroup> for InMemoryTargetingGroupDao {
    fn get(&self, content_id: &str) -> Result<Vec<TargetingGroup>> {
        Ok(self.by_content.get(content_id).cloned().unwrap_or_default())
    }
}
