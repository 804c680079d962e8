//! Container codec benchmarks for raymap_core.
//!
//! Run with: `cargo bench -p raymap_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use raymap_core::container::{decode, encode};
use raymap_core::document::MapDocument;
use raymap_core::math::{from_float, normalize_to_unit};

fn largest_map() -> MapDocument {
    let mut doc = MapDocument::new();
    doc.new_map(255, 255);
    for x in 0..255 {
        for y in 0..255 {
            doc.set_tile(x, y, ((x + y) % 16) as u8);
        }
    }
    doc.set_spawn_position(from_float(127.5), from_float(127.5));
    let (dx, dy) = normalize_to_unit(1.0, 1.0);
    doc.set_spawn_direction(dx, dy);
    doc
}

/// Encode/decode benchmarks on a maximum-size map.
pub fn container_benchmark(c: &mut Criterion) {
    let doc = largest_map();
    let bytes = encode(&doc);

    c.bench_function("encode_255x255", |b| b.iter(|| encode(black_box(&doc))));
    c.bench_function("decode_255x255", |b| {
        b.iter(|| decode(black_box(&bytes)))
    });
}

criterion_group!(benches, container_benchmark);
criterion_main!(benches);
