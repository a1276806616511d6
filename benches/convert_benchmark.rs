//! Benchmarks for undocx conversion performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic Word packages and documents built in memory.

use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use undocx::model::{Block, Document, Paragraph, Run, Table};
use undocx::render::{to_markdown, RenderOptions};
use undocx::source::{MemorySource, SourceParagraph, SourceRun, SourceTable};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Creates a minimal Word package with the given number of sections.
fn create_test_docx(sections: usize) -> Vec<u8> {
    let mut body = String::new();
    for i in 0..sections {
        body.push_str(&format!(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Section {}</w:t></w:r></w:p>"#,
            i + 1
        ));
        body.push_str(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold lead</w:t></w:r><w:r><w:t xml:space="preserve"> followed by plain text for benchmark measurement.</w:t></w:r></w:p>"#,
        );
        body.push_str(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Key</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Value</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
    }
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        W_NS, body
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// Creates an in-memory source with the given number of sections.
fn create_test_source(sections: usize) -> MemorySource {
    let mut source = MemorySource::new("bench.docx");
    for i in 0..sections {
        source = source
            .with_paragraph(
                SourceParagraph::new()
                    .with_style("Heading 1")
                    .with_run(SourceRun::new(format!("Section {}", i + 1))),
            )
            .with_paragraph(SourceParagraph::new().with_run(SourceRun::bold("SUMMARY")))
            .with_paragraph(
                SourceParagraph::new()
                    .with_run(SourceRun::bold("Bold lead"))
                    .with_run(SourceRun::new(" and plain text with a_few *special* chars")),
            )
            .with_table(SourceTable::new(vec![
                vec!["Key".to_string(), "Value".to_string()],
                vec!["a".to_string(), "1".to_string()],
            ]));
    }
    source
}

/// Creates a document model with the given number of sections.
fn create_test_document(sections: usize) -> Document {
    let mut doc = Document::new("bench.docx");
    for i in 0..sections {
        doc.add_block(Block::heading(1, format!("Section {}", i + 1)));
        doc.add_block(Block::heading(2, "Details"));
        let mut para = Paragraph::with_text("Bold and plain (text)\nsecond line");
        para.add_run(Run::bold("Bold"));
        para.add_run(Run::new(" and plain (text)\nsecond line"));
        doc.add_block(Block::Paragraph(para));
        doc.add_block(Block::Table(Table::from_rows(vec![
            vec!["Key".to_string(), "Value".to_string()],
            vec!["a|b".to_string(), "multi\nline".to_string()],
        ])));
    }
    doc
}

/// Benchmark package format detection.
fn bench_format_detection(c: &mut Criterion) {
    let docx_data = create_test_docx(1);
    let non_docx_data = b"Not a Word package at all, just random text content";

    c.bench_function("detect_non_docx", |b| {
        b.iter(|| undocx::detect_format_from_bytes(black_box(non_docx_data)).is_err());
    });

    c.bench_function("detect_package_without_types", |b| {
        b.iter(|| undocx::detect_format_from_bytes(black_box(&docx_data)).is_err());
    });
}

/// Benchmark reading and extracting Word packages at various sizes.
fn bench_docx_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_parsing");

    for sections in [1, 10, 100].iter() {
        let data = create_test_docx(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| undocx::parse_bytes(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark structural extraction from an in-memory source.
fn bench_extraction(c: &mut Criterion) {
    let source = create_test_source(100);

    c.bench_function("extract_100_sections", |b| {
        b.iter(|| undocx::extract::extract(black_box(&source)));
    });
}

/// Benchmark Markdown rendering.
fn bench_rendering(c: &mut Criterion) {
    let doc = create_test_document(100);
    let options = RenderOptions::default();

    c.bench_function("render_100_sections", |b| {
        b.iter(|| to_markdown(black_box(&doc), &options).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_docx_parsing,
    bench_extraction,
    bench_rendering,
);
criterion_main!(benches);
