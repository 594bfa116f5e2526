//! Benchmarks for the scan loop.

#![allow(clippy::format_push_string)] // benchmark setup code

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use snip_core::{ParseOptions, Parser};

/// Generate source with `blocks` marked ranges of `lines_per_block`
/// content lines each.
fn generate_source(blocks: usize, lines_per_block: usize) -> String {
    let mut source = String::with_capacity(blocks * lines_per_block * 40);
    for block in 0..blocks {
        source.push_str(&format!("#@range_begin(block{block})\n"));
        for line in 0..lines_per_block {
            source.push_str(&format!("    let value_{line} = compute({line});\n"));
        }
        source.push_str(&format!("#@range_end(block{block})\n"));
    }
    source
}

fn bench_scan_plain(c: &mut Criterion) {
    let source = "fn helper() {\n    work();\n}\n".repeat(500);
    let parser = Parser::new(ParseOptions::default());

    let mut group = c.benchmark_group("scan_plain");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("1500_lines", |b| {
        b.iter(|| parser.parse(&source));
    });
    group.finish();
}

fn bench_scan_ranges(c: &mut Criterion) {
    let parser = Parser::new(ParseOptions::default());

    let mut group = c.benchmark_group("scan_ranges");
    for blocks in [10, 100] {
        let source = generate_source(blocks, 20);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &source, |b, source| {
            b.iter(|| parser.parse(source));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan_plain, bench_scan_ranges);
criterion_main!(benches);
