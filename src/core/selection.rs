use crate::core::ranking::rank_targeting_groups;
use crate::core::targeting::TargetingEvaluator;
use crate::core::{
    AdvertisementContent, GeneratedAdvertisement, ReadableDao, RequestContext, TargetingGroup,
};
use crate::utils::error::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Builder;

/// How one entry is drawn from the pool of eligible candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SelectionStrategy {
    /// Uniformly at random over pool entries.
    #[default]
    Random,
    /// The entry whose eligible group has the highest click-through rate;
    /// ties go to the earliest entry.
    HighestCtr,
}

/// One pool entry per eligible (content, targeting group) pair.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    content: &'a AdvertisementContent,
    click_through_rate: f64,
}

/// Picks the advertisement to be rendered for a customer in a marketplace.
pub struct SelectionEngine<C, T> {
    content_dao: C,
    targeting_group_dao: T,
    strategy: SelectionStrategy,
}

impl<C, T> SelectionEngine<C, T>
where
    C: ReadableDao<str, AdvertisementContent>,
    T: ReadableDao<str, TargetingGroup>,
{
    pub fn new(content_dao: C, targeting_group_dao: T) -> Self {
        Self {
            content_dao,
            targeting_group_dao,
            strategy: SelectionStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Same as [`Self::select_advertisement_with_rng`] using the thread-local
    /// generator.
    pub fn select_advertisement(
        &self,
        customer_id: Option<&str>,
        marketplace_id: Option<&str>,
    ) -> Result<GeneratedAdvertisement> {
        self.select_advertisement_with_rng(customer_id, marketplace_id, &mut rand::thread_rng())
    }

    /// Returns an advertisement the customer is eligible for, or the empty
    /// advertisement when the marketplace id is missing, the marketplace has
    /// no content, or nothing passes targeting. Lookup failures are returned
    /// as `Err` without retry.
    pub fn select_advertisement_with_rng<R: Rng>(
        &self,
        customer_id: Option<&str>,
        marketplace_id: Option<&str>,
        rng: &mut R,
    ) -> Result<GeneratedAdvertisement> {
        let marketplace_id = match marketplace_id {
            Some(id) if !id.is_empty() => id,
            _ => {
                tracing::warn!("MarketplaceId cannot be null or empty. Returning an empty ad");
                return Ok(GeneratedAdvertisement::empty());
            }
        };

        let request_context = RequestContext::new(customer_id, marketplace_id);

        let contents = self.content_dao.get(marketplace_id)?;
        if contents.is_empty() {
            tracing::debug!("No content for marketplace {}", marketplace_id);
            return Ok(GeneratedAdvertisement::empty());
        }

        let pool = self.eligible_candidates(&contents, &request_context)?;
        tracing::debug!(
            "Marketplace {}: {} contents, {} eligible pool entries",
            marketplace_id,
            contents.len(),
            pool.len()
        );

        let Some(chosen) = self.pick(&pool, rng) else {
            return Ok(GeneratedAdvertisement::empty());
        };

        tracing::debug!(
            "Selected content {} (ctr {}) using {:?}",
            chosen.content.content_id,
            chosen.click_through_rate,
            self.strategy
        );

        let id = Builder::from_random_bytes(rng.gen()).into_uuid();
        Ok(GeneratedAdvertisement::new(id, chosen.content.clone()))
    }

    fn eligible_candidates<'c>(
        &self,
        contents: &'c [AdvertisementContent],
        request_context: &RequestContext,
    ) -> Result<Vec<Candidate<'c>>> {
        let evaluator = TargetingEvaluator::new(request_context);
        let mut pool = Vec::new();

        for content in contents {
            let mut groups = self.targeting_group_dao.get(content.content_id.as_str())?;
            rank_targeting_groups(&mut groups);

            pool.extend(
                groups
                    .iter()
                    .filter(|group| evaluator.evaluate(group).is_true())
                    .map(|group| Candidate {
                        content,
                        click_through_rate: group.click_through_rate,
                    }),
            );
        }

        Ok(pool)
    }

    fn pick<'p, 'c, R: Rng>(
        &self,
        pool: &'p [Candidate<'c>],
        rng: &mut R,
    ) -> Option<&'p Candidate<'c>> {
        match self.strategy {
            SelectionStrategy::Random => pool.choose(rng),
            SelectionStrategy::HighestCtr => pool.iter().reduce(|best, candidate| {
                if candidate.click_through_rate > best.click_through_rate {
                    candidate
                } else {
                    best
                }
            }),
        }
    }
}
