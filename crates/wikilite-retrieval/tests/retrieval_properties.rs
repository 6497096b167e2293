//! Property tests for selection and fuzzy ranking.

use proptest::prelude::*;

use wikilite_core::config::{SearchConfig, SelectionPolicy};
use wikilite_retrieval::search::fuzzy::search_word_distance;
use wikilite_retrieval::BoundedSelector;
use wikilite_storage::queries::corpus_ops;
use wikilite_storage::StorageEngine;

proptest! {
    /// Exact selection equals a stable sort truncated to k.
    #[test]
    fn exact_selector_matches_sort_and_truncate(
        distances in prop::collection::vec(0u32..50, 0..200),
        k in 0usize..30,
    ) {
        let mut selector = BoundedSelector::new(k, SelectionPolicy::Exact);
        for (i, d) in distances.iter().enumerate() {
            selector.push(f64::from(*d), i);
        }

        let mut expected: Vec<(f64, usize)> = distances
            .iter()
            .enumerate()
            .map(|(i, d)| (f64::from(*d), i))
            .collect();
        expected.sort_by(|a, b| a.0.total_cmp(&b.0));
        expected.truncate(k);

        prop_assert_eq!(selector.into_sorted(), expected);
    }

    /// Replace-first-worse never retains more than k and only returns
    /// offered items, ascending.
    #[test]
    fn replace_first_worse_stays_bounded_and_sorted(
        distances in prop::collection::vec(0u32..50, 0..200),
        k in 0usize..30,
    ) {
        let mut selector = BoundedSelector::new(k, SelectionPolicy::ReplaceFirstWorse);
        for (i, d) in distances.iter().enumerate() {
            selector.push(f64::from(*d), i);
        }
        let kept = selector.into_sorted();
        prop_assert!(kept.len() <= k);
        prop_assert_eq!(kept.len(), k.min(distances.len()));
        prop_assert!(kept.windows(2).all(|w| w[0].0 <= w[1].0));
        for (d, i) in kept {
            prop_assert_eq!(d, f64::from(distances[i]));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Fuzzy results are distinct, ascending, and independent of batch size.
    #[test]
    fn fuzzy_results_independent_of_batch_size(
        terms in prop::collection::vec("[a-d]{1,4}", 1..40),
        batch in 1usize..9,
    ) {
        let storage = StorageEngine::open_in_memory().unwrap();
        storage.with_writer(|conn| corpus_ops::insert_terms(conn, &terms)).unwrap();

        let small = SearchConfig { vocabulary_batch_size: batch, ..SearchConfig::default() };
        let large = SearchConfig::default();

        let a = search_word_distance(&storage, &small, "abc", 10).unwrap();
        let b = search_word_distance(&storage, &large, "abc", 10).unwrap();
        prop_assert_eq!(&a, &b);

        prop_assert!(a.windows(2).all(|w| w[0].distance <= w[1].distance));
        let mut seen = std::collections::HashSet::new();
        for m in &a {
            prop_assert!(seen.insert(m.term.clone()));
        }
    }
}
