use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wikilite_core::config::SearchConfig;
use wikilite_retrieval::RetrievalEngine;

use test_fixtures::sample_corpus;

fn bench_vector_search(c: &mut Criterion) {
    let corpus = sample_corpus();
    let engine = RetrievalEngine::new(&corpus.storage, SearchConfig::default())
        .with_provider(&corpus.embedder);

    c.bench_function("search_vectors_sample_corpus", |b| {
        b.iter(|| engine.search_vectors(black_box("city on a river"), black_box(5)))
    });
}

fn bench_word_distance(c: &mut Criterion) {
    let corpus = sample_corpus();
    let engine = RetrievalEngine::new(&corpus.storage, SearchConfig::default());

    c.bench_function("search_word_distance_sample_corpus", |b| {
        b.iter(|| engine.search_word_distance(black_box("domestcated"), black_box(5)))
    });
}

criterion_group!(benches, bench_vector_search, bench_word_distance);
criterion_main!(benches);
