//! Parser benchmarks.
//!
//! Run with `cargo bench --package dlc-par`.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_parser_literal(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_literal");
    let source = "42";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("integer_literal", |b| b.iter(|| dlc_par::parse(black_box(source))));
    group.finish();
}

fn bench_parser_let_binding(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_let_binding");
    let source = "x = 42\nx + 1";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("let_binding", |b| b.iter(|| dlc_par::parse(black_box(source))));
    group.finish();
}

fn bench_parser_function_clauses(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_function_clauses");
    let source = "fib(0) = 0\nfib(1) = 1\nfib(n) = fib(n - 1) + fib(n - 2)";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("multi_clause_function", |b| b.iter(|| dlc_par::parse(black_box(source))));
    group.finish();
}

fn bench_parser_nested_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_nested_blocks");
    let source = r#"
        do
          x = 1
          y = do
            z = x + 1
            z * 2
          end
          case y of
            2 -> "two"
            _ -> "other"
          end
        end
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("nested_do_and_case", |b| b.iter(|| dlc_par::parse(black_box(source))));
    group.finish();
}

criterion_group!(
    benches,
    bench_parser_literal,
    bench_parser_let_binding,
    bench_parser_function_clauses,
    bench_parser_nested_blocks
);
criterion_main!(benches);
