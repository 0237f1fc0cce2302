// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use criterion::*;
use trace_recon::{Annotation, Endpoint, Span};

/// A shuffled pool of fragments forming a complete binary call tree of the
/// given depth, with one duplicate report per hop.
fn fragment_pool(depth: u32) -> (Span, Vec<Span>) {
    let endpoint = Endpoint::new(0x0a00_0001, 9411);
    let root = Span::new(1).annotate(Annotation::server_recv(0, endpoint));

    let mut fragments = Vec::new();
    for id in 2..(1u64 << depth) {
        let parent = id / 2;
        fragments.push(
            Span::new(id)
                .with_parent(parent)
                .annotate(Annotation::client_send(id * 1_000_000, endpoint)),
        );
        fragments.push(
            Span::new(id)
                .with_parent(parent)
                .annotate(Annotation::server_recv(id * 1_000_000 + 500, endpoint)),
        );
    }
    // Interleave so parents rarely precede their children in the pool.
    fragments.reverse();
    (root, fragments)
}

pub fn merge_binary_tree(c: &mut Criterion) {
    let (root, fragments) = fragment_pool(7);

    c.bench_function("merge 127-hop binary tree from shuffled fragments", |b| {
        b.iter(|| {
            let merged = root.merge(black_box(fragments.clone()));
            black_box(merged)
        })
    });
}

pub fn incremental_merge(c: &mut Criterion) {
    let (root, fragments) = fragment_pool(6);

    c.bench_function("merge 63-hop tree one fragment at a time", |b| {
        b.iter(|| {
            let mut tree = root.clone();
            for fragment in fragments.clone() {
                tree = tree.merge(vec![fragment]);
            }
            black_box(tree)
        })
    });
}

criterion_group!(benches, merge_binary_tree, incremental_merge);
criterion_main!(benches);
