use ad_selector::core::predicates::{ConstantPredicate, RecognizedCustomerPredicate};
use ad_selector::{
    AdError, AdvertisementContent, InMemoryContentDao, InMemoryTargetingGroupDao, ReadableDao,
    Result, SelectionEngine, SelectionStrategy, TargetingGroup,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps a DAO and counts lookups.
struct CountingDao<D> {
    inner: D,
    calls: Arc<AtomicUsize>,
}

impl<D> CountingDao<D> {
    fn new(inner: D) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl<V, D: ReadableDao<str, V>> ReadableDao<str, V> for CountingDao<D> {
    fn get(&self, key: &str) -> Result<Vec<V>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }
}

fn content(id: &str) -> AdvertisementContent {
    AdvertisementContent::new(id, "US", format!("<div>{}</div>", id))
}

fn engine(
    contents: Vec<AdvertisementContent>,
    groups: Vec<TargetingGroup>,
) -> SelectionEngine<InMemoryContentDao, InMemoryTargetingGroupDao> {
    SelectionEngine::new(
        contents.into_iter().collect(),
        groups.into_iter().collect(),
    )
}

fn histogram<C, T>(engine: &SelectionEngine<C, T>, draws: usize, seed: u64) -> HashMap<String, usize>
where
    C: ReadableDao<str, AdvertisementContent>,
    T: ReadableDao<str, TargetingGroup>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = HashMap::new();
    for _ in 0..draws {
        let ad = engine
            .select_advertisement_with_rng(Some("C-1"), Some("US"), &mut rng)
            .unwrap();
        let id = ad.content().expect("pool is not empty").content_id.clone();
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_missing_or_empty_marketplace_skips_lookups() {
    let (content_dao, content_calls) =
        CountingDao::new(vec![content("A")].into_iter().collect::<InMemoryContentDao>());
    let (group_dao, group_calls) = CountingDao::new(
        vec![TargetingGroup::new("G1", "A", 0.1)]
            .into_iter()
            .collect::<InMemoryTargetingGroupDao>(),
    );
    let engine = SelectionEngine::new(content_dao, group_dao);

    assert!(engine.select_advertisement(Some("C-1"), Some("")).unwrap().is_empty());
    assert!(engine.select_advertisement(Some("C-1"), None).unwrap().is_empty());
    assert!(engine.select_advertisement(None, None).unwrap().is_empty());

    assert_eq!(content_calls.load(Ordering::SeqCst), 0);
    assert_eq!(group_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_missing_customer_does_not_short_circuit() {
    let engine = engine(vec![content("A")], vec![TargetingGroup::new("G1", "A", 0.1)]);

    let ad = engine.select_advertisement(None, Some("US")).unwrap();
    assert_eq!(ad.content().unwrap().content_id, "A");

    let ad = engine.select_advertisement(Some(""), Some("US")).unwrap();
    assert_eq!(ad.content().unwrap().content_id, "A");
}

#[test]
fn test_marketplace_without_content_is_empty() {
    let (group_dao, group_calls) = CountingDao::new(InMemoryTargetingGroupDao::new());
    let engine = SelectionEngine::new(InMemoryContentDao::new(), group_dao);

    assert!(engine.select_advertisement(None, Some("US")).unwrap().is_empty());
    assert_eq!(group_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_content_in_other_marketplace_is_not_considered() {
    let engine = engine(
        vec![AdvertisementContent::new("A", "DE", "a")],
        vec![TargetingGroup::new("G1", "A", 0.1)],
    );
    assert!(engine.select_advertisement(None, Some("US")).unwrap().is_empty());
}

#[test]
fn test_every_group_failing_yields_empty() {
    let engine = engine(
        vec![content("A"), content("B")],
        vec![
            TargetingGroup::new("G1", "A", 0.3)
                .with_predicate(ConstantPredicate::always())
                .with_predicate(ConstantPredicate::never()),
            TargetingGroup::new("G2", "A", 0.5).with_predicate(ConstantPredicate::never()),
            TargetingGroup::new("G3", "B", 0.1)
                .with_predicate(ConstantPredicate::never())
                .with_predicate(ConstantPredicate::always()),
        ],
    );
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..20 {
        let ad = engine
            .select_advertisement_with_rng(Some("C-1"), Some("US"), &mut rng)
            .unwrap();
        assert!(ad.is_empty());
    }
}

#[test]
fn test_only_eligible_content_is_returned() {
    let engine = engine(
        vec![content("A"), content("B")],
        vec![
            TargetingGroup::new("G1", "A", 0.2).with_predicate(ConstantPredicate::always()),
            TargetingGroup::new("G2", "B", 0.8).with_predicate(ConstantPredicate::never()),
        ],
    );

    let counts = histogram(&engine, 200, 11);
    assert_eq!(counts.get("A"), Some(&200));
    assert_eq!(counts.get("B"), None);
}

#[test]
fn test_group_without_predicates_is_eligible() {
    let engine = engine(vec![content("A")], vec![TargetingGroup::new("G1", "A", 0.0)]);
    let ad = engine.select_advertisement(Some("C-1"), Some("US")).unwrap();
    assert_eq!(ad.content().unwrap().content_id, "A");
}

#[test]
fn test_one_passing_group_is_enough() {
    let engine = engine(
        vec![content("A")],
        vec![
            TargetingGroup::new("G1", "A", 0.9).with_predicate(ConstantPredicate::never()),
            TargetingGroup::new("G2", "A", 0.1).with_predicate(RecognizedCustomerPredicate),
        ],
    );

    let ad = engine.select_advertisement(Some("C-1"), Some("US")).unwrap();
    assert_eq!(ad.content().unwrap().content_id, "A");

    let ad = engine.select_advertisement(None, Some("US")).unwrap();
    assert!(ad.is_empty());
}

#[test]
fn test_eligible_contents_are_picked_uniformly() {
    let engine = engine(
        vec![content("A"), content("B"), content("C")],
        vec![
            TargetingGroup::new("G1", "A", 0.1),
            TargetingGroup::new("G2", "B", 0.5),
            TargetingGroup::new("G3", "C", 0.9),
            TargetingGroup::new("G4", "C", 0.2).with_predicate(ConstantPredicate::never()),
        ],
    );

    let draws = 30_000;
    let counts = histogram(&engine, draws, 2024);
    for id in ["A", "B", "C"] {
        let share = *counts.get(id).unwrap() as f64 / draws as f64;
        assert!(
            (share - 1.0 / 3.0).abs() < 0.02,
            "content {} picked with share {}",
            id,
            share
        );
    }
}

#[test]
fn test_content_with_several_eligible_groups_is_weighted() {
    let engine = engine(
        vec![content("A"), content("B")],
        vec![
            TargetingGroup::new("G1", "A", 0.1),
            TargetingGroup::new("G2", "A", 0.2),
            TargetingGroup::new("G3", "B", 0.3),
        ],
    );

    let draws = 30_000;
    let counts = histogram(&engine, draws, 99);
    let share_a = *counts.get("A").unwrap() as f64 / draws as f64;
    assert!((share_a - 2.0 / 3.0).abs() < 0.02, "share of A was {}", share_a);
}

#[test]
fn test_highest_ctr_strategy_is_deterministic() {
    let engine = engine(
        vec![content("A"), content("B")],
        vec![
            TargetingGroup::new("G1", "A", 0.4),
            TargetingGroup::new("G2", "B", 0.6),
            TargetingGroup::new("G3", "A", 0.99).with_predicate(ConstantPredicate::never()),
        ],
    )
    .with_strategy(SelectionStrategy::HighestCtr);

    let counts = histogram(&engine, 50, 5);
    assert_eq!(counts.get("B"), Some(&50));
}

#[test]
fn test_lookup_failure_propagates_to_caller() {
    struct Unavailable;

    impl ReadableDao<str, TargetingGroup> for Unavailable {
        fn get(&self, key: &str) -> Result<Vec<TargetingGroup>> {
            Err(AdError::retrieval("targeting_groups", format!("no route for {}", key)))
        }
    }

    let engine = SelectionEngine::new(
        vec![content("A")].into_iter().collect::<InMemoryContentDao>(),
        Unavailable,
    );

    let err = engine.select_advertisement(None, Some("US")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Lookup failed in targeting_groups: no route for A"
    );
}
