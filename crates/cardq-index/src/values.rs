//! Distinct values of small-domain fields, computed once per suggester.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use cardq_card::CardRepository;
use parking_lot::Mutex;

use crate::{adapter::CardDocumentAdapter, fields::UserField};

/// Lazily filled map from field to its distinct, lowercased values.
#[derive(Debug, Default)]
pub struct ValueCache {
    /// Values per field, in first-seen order.
    values: Mutex<HashMap<UserField, Arc<Vec<String>>>>,
}

impl ValueCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct values of `field` across `repository`, computed on first use.
    pub fn get_or_compute(
        &self,
        field: UserField,
        repository: &CardRepository,
        adapter: &CardDocumentAdapter,
    ) -> Arc<Vec<String>> {
        let mut values = self.values.lock();
        Arc::clone(values.entry(field).or_insert_with(|| {
            let mut seen = HashSet::new();
            let distinct = repository
                .cards()
                .flat_map(|card| adapter.values(card, field, "en"))
                .map(|v| v.trim().to_lowercase())
                .filter(|v| seen.insert(v.clone()))
                .collect();
            Arc::new(distinct)
        }))
    }

    /// Number of cached fields.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

#[cfg(test)]
mod test {
    use cardq_card::fixtures;

    use super::*;

    #[test]
    fn computes_distinct_lowercase_values_once() {
        let repo = fixtures::sample_repository();
        let adapter = CardDocumentAdapter::new();
        let cache = ValueCache::new();
        assert!(cache.is_empty());

        let rarities = cache.get_or_compute(UserField::Rarity, &repo, &adapter);
        assert_eq!(
            rarities.as_slice(),
            ["common", "rare", "uncommon", "special", "mythic"]
        );

        let again = cache.get_or_compute(UserField::Rarity, &repo, &adapter);
        assert!(Arc::ptr_eq(&rarities, &again));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn combinatoric_values_are_flattened() {
        let repo = fixtures::sample_repository();
        let adapter = CardDocumentAdapter::new();
        let cache = ValueCache::new();

        let colors = cache.get_or_compute(UserField::Color, &repo, &adapter);
        assert!(colors.contains(&"red".to_string()));
        assert!(colors.contains(&"colorless".to_string()));
        assert_eq!(colors.iter().filter(|c| c.as_str() == "red").count(), 1);
    }
}
