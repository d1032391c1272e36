//! Benchmarks for txtpdf parsing performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks parse synthetic documents that exercise every block kind.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates a synthetic source document with the given number of sections.
fn create_test_source(section_count: usize) -> String {
    let mut text = String::from(
        "[DOC title=\"Benchmark\" subtitle=\"Sintético\" toc_max_level=2 include_toc=true]\n",
    );

    for i in 1..=section_count {
        text.push_str(&format!("==========\n{}) Sección {}\n==========\n", i, i));
        text.push_str(&format!("{}.1. Conceptos → definiciones\n", i));
        text.push_str("Texto con **negrita**, *cursiva* y `código` que continúa\n");
        text.push_str("en una segunda línea del mismo párrafo.\n\n");
        text.push_str("- primer ítem\n- segundo ítem ✓\n\n");
        text.push_str(":::def Término\nUn cuerpo con [FIG file=\"t.pdf\" page=1] en línea.\n:::\n");
        text.push_str("| Col A | Col B |\n|:---|---:|\n| 1 | 2 |\n| 3 |\n\n");
        text.push_str("```c\nint main(void) { return 0; }\n```\n");
        text.push_str("    paso indentado\n\n");
        text.push_str(&format!("[FIG file=\"apunte.pdf\" page={} zoom=1.5]\n", i));
        text.push_str("-----\n");
    }

    text
}

/// Benchmark line normalization.
fn bench_normalize(c: &mut Criterion) {
    let line = "Caché → memoria ⇒ “rápida” ✓ 🚀 ±5% ≈ 3";

    c.bench_function("normalize_line", |b| {
        b.iter(|| txtpdf::parser::normalize_line(black_box(line)));
    });
}

/// Benchmark document parsing at various sizes.
fn bench_document_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_parsing");

    for section_count in [1, 10, 100].iter() {
        let source = create_test_source(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| txtpdf::parse_str(black_box(&source)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark JSON dumping of a parsed document.
fn bench_json_dump(c: &mut Criterion) {
    let doc = txtpdf::parse_str(&create_test_source(10)).unwrap();

    c.bench_function("json_dump_10_sections", |b| {
        b.iter(|| txtpdf::render::to_json(black_box(&doc), txtpdf::JsonFormat::Compact).unwrap());
    });
}

criterion_group!(benches, bench_normalize, bench_document_parsing, bench_json_dump);
criterion_main!(benches);
