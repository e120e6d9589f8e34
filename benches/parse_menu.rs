//! Menu parsing and URI codec benchmarks.
//!
//! Benchmarks the hot paths of a response:
//! - Directory parsing at different listing sizes
//! - Chunk reassembly
//! - URI parsing and serialization
//!
//! Run with: cargo bench --bench parse_menu
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gopher_client::protocol::parser;
use gopher_client::{ItemType, UriCodec, UriComponents};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const LISTING_SIZES: &[usize] = &[10, 100, 1_000];
const CHUNK_SIZE: usize = 1_460;

// ============================================================================
// Fixtures
// ============================================================================

fn listing(lines: usize) -> Vec<u8> {
    let mut menu = String::new();

    for i in 0..lines {
        if i % 3 == 0 {
            menu.push_str(&format!("iSection {i}\t\terror.host\t1\r\n"));
        } else {
            menu.push_str(&format!(
                "1Directory number {i}\t/dir/{i}\tgopher.example.org\t70\r\n"
            ));
        }
    }

    menu.push_str(".\r\n");
    menu.into_bytes()
}

// ============================================================================
// Benchmark: Directory Parsing
// ============================================================================

fn bench_parse_directory(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_directory");

    for &size in LISTING_SIZES {
        let menu = listing(size);
        group.throughput(Throughput::Bytes(menu.len() as u64));
        group.bench_with_input(BenchmarkId::new("lines", size), &menu, |b, menu| {
            b.iter(|| parser::parse_directory(black_box(menu)));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Chunked Responses
// ============================================================================

fn bench_parse_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_chunks");

    for &size in LISTING_SIZES {
        let menu = listing(size);
        let chunks: Vec<Vec<u8>> = menu.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();

        group.throughput(Throughput::Bytes(menu.len() as u64));
        group.bench_with_input(BenchmarkId::new("normalize", size), &chunks, |b, chunks| {
            b.iter(|| parser::parse_body(black_box(chunks), ItemType::Directory).to_text());
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: URI Codec
// ============================================================================

fn bench_uri_codec(c: &mut Criterion) {
    let codec = UriCodec::with_defaults("gopher.floodgap.com", 70).expect("codec");
    let components = UriComponents::new("gopher.floodgap.com", 70)
        .with_item_type(ItemType::Search)
        .with_selector("/v2/vs")
        .with_query("frogs and toads")
        .with_display_name("Veronica-2 search");
    let uri = components.to_uri();

    let mut group = c.benchmark_group("uri");
    group.bench_function("parse", |b| b.iter(|| codec.parse(black_box(&uri))));
    group.bench_function("serialize", |b| b.iter(|| black_box(&components).to_uri()));
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_directory,
    bench_parse_chunks,
    bench_uri_codec
);
criterion_main!(benches);
