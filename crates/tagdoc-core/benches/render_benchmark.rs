//! Benchmarks for the lex → parse → render pipeline
//!
//! Run with: cargo bench -p tagdoc-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tagdoc_core::{render, Lexer, Parser, TokenKind};

/// Sample article exercising every tag kind
const SAMPLE: &str = r#"[article
    [title "Benchmark Document"]
    [author "Bench Author"]
    [date "2026-08-29"]
    [sec
        [title "Introduction"]
        [p This paragraph mixes plain text with *starred bold*,
           [i italics], [u underlines], and [code lang=rust inline code].]
        [p A second paragraph keeps the block list from being trivial,
           with a formula [math "E = mc^2"] thrown in for the span path.]
    ]
    [sec
        [title "Nested Material"]
        [sec
            [p Sections nest, so the generator's indentation loop gets
               exercised past depth two.]
            [p Escaping work: 1 < 2 && 3 > 2.]
        ]
    ]
]"#;

fn synthetic(sections: usize) -> String {
    let mut doc = String::from("[article [title \"Synthetic\"]\n");
    for i in 0..sections {
        doc.push_str(&format!(
            "[sec [title \"Section {i}\"] [p Body text number {i} with *bold* and [i italic] runs.]]\n"
        ));
    }
    doc.push(']');
    doc
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("tokenize", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(SAMPLE)).unwrap();
            let mut count = 0usize;
            while lexer.advance().kind != TokenKind::Eof {
                count += 1;
            }
            black_box(count)
        })
    });

    group.bench_function("parse", |b| {
        b.iter(|| {
            let tree = Parser::new(black_box(SAMPLE)).unwrap().parse().unwrap();
            black_box(tree.len())
        })
    });

    group.bench_function("render", |b| {
        let tree = Parser::new(SAMPLE).unwrap().parse().unwrap();
        b.iter(|| {
            let html = render(black_box(&tree)).unwrap();
            black_box(html.len())
        })
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [10, 100, 1000].iter() {
        let doc = synthetic(*size);
        group.throughput(Throughput::Bytes(doc.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", size), &doc, |b, doc| {
            b.iter(|| {
                let tree = Parser::new(black_box(doc)).unwrap().parse().unwrap();
                black_box(tree.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("end_to_end", size), &doc, |b, doc| {
            b.iter(|| {
                let tree = Parser::new(black_box(doc)).unwrap().parse().unwrap();
                let html = render(&tree).unwrap();
                black_box(html.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_scaling);
criterion_main!(benches);
