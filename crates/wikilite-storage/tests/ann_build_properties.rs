//! Property tests for ANN index packing.

use proptest::prelude::*;

use wikilite_core::traits::ICorpusStorage;
use wikilite_storage::queries::{ann_build, ann_search, corpus_ops};
use wikilite_storage::StorageEngine;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_vector_resolves_to_its_chunk_slot(
        count in 1usize..40,
        capacity in 1usize..9,
        dims in 1usize..20,
    ) {
        let storage = StorageEngine::open_in_memory().unwrap();
        storage.with_writer(|conn| {
            for id in 1..=count as i64 {
                let v: Vec<f32> = (0..dims).map(|i| ((id as usize * 7 + i) % 5) as f32 - 2.0).collect();
                corpus_ops::upsert_vector(conn, id, &v)?;
            }
            Ok(())
        }).unwrap();

        let stats = storage
            .with_writer(|conn| ann_build::rebuild_ann_index(conn, capacity))
            .unwrap();
        prop_assert_eq!(stats.vectors, count);
        prop_assert_eq!(stats.chunks, count.div_ceil(capacity));
        prop_assert_eq!(stats.vector_size, dims.div_ceil(8));
        prop_assert_eq!(
            storage.with_writer(ann_search::chunk_count).unwrap(),
            stats.chunks
        );

        let mut chunk_ids = Vec::new();
        storage.for_each_ann_chunk(&mut |chunk| {
            chunk_ids.push((chunk.id, chunk.data.len() / stats.vector_size));
            Ok(())
        }).unwrap();

        let mut expected_id = 1i64;
        for (chunk_id, slots) in chunk_ids {
            for position in 0..slots {
                prop_assert_eq!(
                    storage.ann_vector_id(chunk_id, position).unwrap(),
                    Some(expected_id)
                );
                expected_id += 1;
            }
        }
        prop_assert_eq!(expected_id - 1, count as i64);
    }
}
