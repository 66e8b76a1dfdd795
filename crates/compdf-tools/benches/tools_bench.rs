// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the compdf-tools crate: selector parsing against
// the full catalog, and parameter encoding for the largest parameter object.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use compdf_tools::param::WatermarkParameter;
use compdf_tools::{FileParameter, ToolSelector};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Parse a name near the end of the catalog, an endpoint, and a raw path.
fn bench_selector_parse(c: &mut Criterion) {
    c.bench_function("selector_parse (name, endpoint, raw)", |b| {
        b.iter(|| {
            let a: ToolSelector = black_box("remove-watermark").parse().unwrap();
            let e: ToolSelector = black_box("documentAI/dewarp").parse().unwrap();
            let r: ToolSelector = black_box("pdf/ofd").parse().unwrap();
            black_box((a.resolve(), e.resolve(), r.resolve()));
        });
    });
}

/// Encode a fully populated text watermark.
fn bench_watermark_encode(c: &mut Criterion) {
    let param = WatermarkParameter::text("CONFIDENTIAL");
    c.bench_function("watermark_to_parameter_json", |b| {
        b.iter(|| black_box(black_box(&param).to_parameter_json().unwrap()));
    });
}

criterion_group!(benches, bench_selector_parse, bench_watermark_encode);
criterion_main!(benches);
