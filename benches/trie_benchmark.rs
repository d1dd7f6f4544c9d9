use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use triedex::core::types::DocId;
use triedex::index::index_writer::TrieWriter;
use triedex::index::streamed_reader::StreamedTrie;
use triedex::index::trie::Trie;
use triedex::storage::layout::IndexPaths;

// Deterministic corpus: `docs` documents of `words_per_doc` random
// lowercase words, 3 to 11 characters each.
fn generate_corpus(docs: u32, words_per_doc: usize) -> Vec<(DocId, Vec<String>)> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..docs)
        .map(|doc| {
            let words = (0..words_per_doc)
                .map(|_| {
                    let len = rng.gen_range(3..12);
                    (0..len)
                        .map(|_| rng.gen_range(b'a'..=b'z') as char)
                        .collect()
                })
                .collect();
            (DocId(doc), words)
        })
        .collect()
}

fn build_trie(corpus: &[(DocId, Vec<String>)]) -> Trie {
    let mut trie = Trie::new();
    for (doc, words) in corpus {
        for word in words {
            trie.insert(word, *doc).unwrap();
        }
    }
    trie
}

fn bench_trie_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie_build");

    for docs in [100u32, 1000] {
        let corpus = generate_corpus(docs, 50);
        group.bench_with_input(
            BenchmarkId::new("insert_corpus", format!("{}_docs", docs)),
            &corpus,
            |b, corpus| b.iter(|| black_box(build_trie(corpus))),
        );
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut group = c.benchmark_group("serialize");

    for docs in [100u32, 1000] {
        let trie = build_trie(&generate_corpus(docs, 50));
        let paths = IndexPaths::new(temp_dir.path().join(format!("bench_{}", docs)));
        group.bench_with_input(
            BenchmarkId::new("write_two_files", format!("{}_docs", docs)),
            &trie,
            |b, trie| {
                let writer = TrieWriter::new(paths.clone());
                b.iter(|| writer.write(black_box(trie)).unwrap())
            },
        );
    }

    group.finish();
}

fn bench_streamed_query(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let trie = build_trie(&generate_corpus(1000, 50));
    let paths = IndexPaths::new(temp_dir.path().join("bench_query"));
    TrieWriter::new(paths.clone()).write(&trie).unwrap();

    let mut group = c.benchmark_group("streamed_query");

    // Short prefixes touch wide subtrees, long ones mostly miss.
    for prefix in ["q", "qu", "quart"] {
        group.bench_with_input(
            BenchmarkId::new("files_with_prefix", prefix),
            &prefix,
            |b, prefix| {
                let mut streamed = StreamedTrie::open(&paths).unwrap();
                b.iter(|| black_box(streamed.files_with_prefix(prefix).unwrap()))
            },
        );
    }

    group.bench_function("exact_word_lookup", |b| {
        let mut streamed = StreamedTrie::open(&paths).unwrap();
        b.iter(|| black_box(streamed.files_for_word("indexing").unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_trie_build,
    bench_serialize,
    bench_streamed_query
);
criterion_main!(benches);
