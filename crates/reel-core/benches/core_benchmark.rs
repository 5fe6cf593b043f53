//! Benchmark tests for reel-core operations
//!
//! Run with: cargo bench -p reel-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use reel_core::{PlaybackSession, SessionConfig, VideoLibrary};

// ============================================================================
// Helpers
// ============================================================================

/// Generate a catalog listing with N videos, every third one untagged
fn generate_catalog(video_count: usize) -> String {
    let topics = ["cat", "dog", "google", "career", "cooking", "travel", "music"];
    let mut listing = String::new();

    for i in 0..video_count {
        let topic = topics[i % topics.len()];
        if i % 3 == 0 {
            listing.push_str(&format!("Video about nothing {} | nothing_{:05} |\n", i, i));
        } else {
            listing.push_str(&format!(
                "Amazing {} clip {} | {}_{:05} | #{} , #animal\n",
                topic, i, topic, i, topic
            ));
        }
    }

    listing
}

fn create_session(video_count: usize) -> PlaybackSession {
    let library = VideoLibrary::parse(&generate_catalog(video_count)).unwrap();
    PlaybackSession::new(library, SessionConfig::default())
}

// ============================================================================
// Catalog Benchmarks
// ============================================================================

fn bench_catalog_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Catalog Parse");

    for &count in &[10, 100, 1000] {
        let listing = generate_catalog(count);
        group.bench_with_input(
            BenchmarkId::new("VideoLibrary::parse", count),
            &listing,
            |b, listing| {
                b.iter(|| black_box(VideoLibrary::parse(black_box(listing)).unwrap()));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Session Benchmarks
// ============================================================================

fn bench_listing_and_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Listing and Search");

    for &count in &[10, 100, 1000] {
        let session = create_session(count);

        group.bench_with_input(BenchmarkId::new("list_videos", count), &session, |b, session| {
            b.iter(|| black_box(session.list_videos()));
        });

        group.bench_with_input(BenchmarkId::new("search", count), &session, |b, session| {
            b.iter(|| black_box(session.search(black_box("CAT"))));
        });

        group.bench_with_input(BenchmarkId::new("search_by_tag", count), &session, |b, session| {
            b.iter(|| black_box(session.search_by_tag(black_box("#animal"))));
        });
    }

    group.finish();
}

fn bench_play_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("Play Random");

    for &count in &[10, 100, 1000] {
        group.bench_function(BenchmarkId::new("play_random", count), |b| {
            let mut session = create_session(count);
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(session.play_random(&mut rng).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    catalog_benches,
    bench_catalog_parse,
);

criterion_group!(
    session_benches,
    bench_listing_and_search,
    bench_play_random,
);

criterion_main!(
    catalog_benches,
    session_benches,
);
