//! Criterion benchmarks for weaving and normalization.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use verse_weave::models::{DocumentPair, Paragraph, WeaveParams, MARKER_DELIMITER};
use verse_weave::weave::{weave, weave_batch};

fn hebrew_verse(n: usize) -> Paragraph {
    Paragraph::from_text(format!(
        "ויאמר אלהים יהי אור ויהי אור {d}({}){d}:",
        n % 10 + 1,
        d = MARKER_DELIMITER
    ))
}

fn english_verse(n: usize) -> Paragraph {
    Paragraph::from_text(format!(
        "Genesis 1::{} And God said, Let there be light: and there was light.",
        n + 1
    ))
}

fn create_chapter(size: usize) -> (Vec<Paragraph>, Vec<Paragraph>) {
    (
        (0..size).map(hebrew_verse).collect(),
        (0..size).map(english_verse).collect(),
    )
}

fn bench_weave(c: &mut Criterion) {
    let params = WeaveParams::default();

    let sizes = [10, 100, 1000];

    let mut group = c.benchmark_group("weave");

    for size in sizes {
        let (source, target) = create_chapter(size);

        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| weave(black_box(&source), black_box(&target), &params))
        });

        // Interleaving and restyling only
        let plain = WeaveParams {
            reposition_markers: false,
            collapse_separators: false,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("no_normalization", size), &size, |b, _| {
            b.iter(|| weave(black_box(&source), black_box(&target), &plain))
        });
    }

    group.finish();
}

fn bench_reposition(c: &mut Criterion) {
    use verse_weave::marker::reposition;

    let mut group = c.benchmark_group("reposition");

    let marked = hebrew_verse(7).text();
    group.bench_function("marked", |b| b.iter(|| reposition(black_box(&marked))));

    // Lines without a marker take the pass-through path
    let unmarked = "והארץ היתה תהו ובהו וחשך על פני תהום";
    group.bench_function("unmarked", |b| b.iter(|| reposition(black_box(unmarked))));

    group.finish();
}

fn bench_punctuation(c: &mut Criterion) {
    use verse_weave::filename::sanitize;
    use verse_weave::punctuation::collapse_double_separator;

    let mut group = c.benchmark_group("punctuation");

    let line = english_verse(0).text();
    group.bench_function("collapse", |b| {
        b.iter(|| collapse_double_separator(black_box(&line)))
    });

    let name = "Bereshit_Chapter_1   Verses__1-31_ בראשית ברא אלהים_.docx";
    group.bench_function("sanitize", |b| b.iter(|| sanitize(black_box(name))));

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let params = WeaveParams::default();

    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    let pair_counts = [10, 50];

    for count in pair_counts {
        let pairs: Vec<DocumentPair> = (0..count)
            .map(|n| {
                let (source, target) = create_chapter(50);
                DocumentPair {
                    prefix: Some(format!("chapter_{}", n)),
                    source,
                    target,
                }
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("parallel", count), &count, |b, _| {
            b.iter(|| weave_batch(black_box(&pairs), &params, false))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_weave,
    bench_reposition,
    bench_punctuation,
    bench_batch
);
criterion_main!(benches);
