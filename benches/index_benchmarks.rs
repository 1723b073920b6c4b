//! Benchmarks for index and graph operations.
//!
//! Run with: cargo bench --bench index_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use notegraph::graph::GraphBuilder;
use notegraph::index::{FileIndex, IndexStore, LinkCache};
use notegraph::infra::RealFs;
use notegraph::nav::Resolver;
use notegraph::settings::Settings;
use std::fs;
use std::time::{Duration, Instant};
use tempfile::TempDir;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Sub-directories notes are spread over
const FOLDERS: &[&str] = &["inbox", "projects/alpha", "projects/beta", "reference", "journal"];

/// Sample words for generating note bodies
const WORDS: &[&str] = &[
    "architecture",
    "design",
    "pattern",
    "system",
    "component",
    "interface",
    "module",
    "function",
    "abstraction",
    "dependency",
    "testing",
    "performance",
];

/// Generate content for note `index` linking to a few deterministic neighbours
fn generate_note_content(index: usize, count: usize) -> String {
    let mut content = String::new();
    if index % 4 == 0 {
        content.push_str(&format!(
            "---\ntitle: Note {index}\naliases: [alias-{index}]\ntags: [bench]\n---\n"
        ));
    }
    content.push_str(&format!("# Note {index}\n\n"));
    for step in [1, 7, 31] {
        let target = (index + step) % count;
        let word = WORDS[(index + step) % WORDS.len()];
        content.push_str(&format!("The {word} is covered in [[note-{target}]].\n"));
    }
    content.push_str(&format!("Missing: [[ghost-{index}]] and [doc](note-{}.md)\n", (index * 3) % count));
    content
}

/// Create a temporary directory with N note files
fn create_test_notes(count: usize) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    for i in 0..count {
        let folder = dir.path().join(FOLDERS[i % FOLDERS.len()]);
        fs::create_dir_all(&folder).expect("Failed to create folder");
        let content = generate_note_content(i, count);
        fs::write(folder.join(format!("note-{i}.md")), content).expect("Failed to write note");
    }

    dir
}

fn settings() -> Settings {
    Settings {
        scan_limit: 10_000,
        ..Settings::default()
    }
}

// =============================================================================
// Index Benchmarks
// =============================================================================

fn bench_file_index_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_index_rebuild");

    for size in [100, 500, 1000] {
        // Create test data once, outside the benchmark
        let dir = create_test_notes(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &size, |b, _| {
            let mut index = FileIndex::new();
            b.iter(|| index.rebuild(&RealFs, dir.path(), 10_000).unwrap());
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let dir = create_test_notes(1000);
    let settings = settings();
    let resolver = Resolver::new(&RealFs, dir.path(), &settings);

    group.bench_function("stem_hit", |b| {
        let mut store = IndexStore::default();
        b.iter(|| resolver.resolve(&mut store, "note-500", None));
    });

    group.bench_function("alias_hit_warm", |b| {
        let mut store = IndexStore::default();
        resolver.resolve(&mut store, "alias-996", None);
        b.iter(|| resolver.resolve(&mut store, "alias-996", None));
    });

    group.bench_function("miss_cold", |b| {
        b.iter(|| {
            let mut store = IndexStore::default();
            resolver.resolve(&mut store, "does-not-exist", None)
        });
    });

    group.finish();
}

fn bench_link_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_extraction");
    let dir = create_test_notes(100);
    let path = dir.path().join("inbox").join("note-0.md");

    group.bench_function("cold", |b| {
        b.iter(|| LinkCache::new().extract(&RealFs, &path, 100));
    });

    group.bench_function("cached", |b| {
        let mut cache = LinkCache::new();
        cache.extract(&RealFs, &path, 100);
        b.iter(|| cache.extract(&RealFs, &path, 100));
    });

    group.finish();
}

// =============================================================================
// Graph Benchmarks
// =============================================================================

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");
    let dir = create_test_notes(1000);
    let settings = settings();
    let builder = GraphBuilder::new(&RealFs, dir.path(), &settings);
    let start = dir.path().join("inbox").join("note-0.md");

    for depth in [1, 2, 3] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            // Zero TTL: every build traverses, with warm file and link caches.
            let mut store = IndexStore::new(Duration::ZERO);
            b.iter(|| builder.build(&mut store, "note-0", &start, depth, Instant::now()));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    index_benches,
    bench_file_index_rebuild,
    bench_resolve,
    bench_link_extraction,
);

criterion_group!(graph_benches, bench_graph_build);

criterion_main!(index_benches, graph_benches);
