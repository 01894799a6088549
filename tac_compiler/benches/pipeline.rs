use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tac_compiler::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    {
        let source = include_str!("../tests/loops.src");

        c.bench_function("loops pipeline", |b| b.iter(|| black_box(compile_str(black_box(source)))));
    }

    {
        // Long straight-line program with a loop every few statements.
        let source = (0..500)
            .map(|i| format!("x{0} = {0} * 2 + 1\nwhile x{0} > 0:\n    x{0} = x{0} - 1\n", i))
            .collect::<String>();

        c.bench_function("generated pipeline", |b| b.iter(|| black_box(compile_str(black_box(&source)))));
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
