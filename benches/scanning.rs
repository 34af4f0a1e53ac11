//! Benchmarks for scanning tagged text.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hidemark::document::{Document, Scanner};
use hidemark::format::{HeadlineLevel, MarkerKind};

fn tagged_note(paragraphs: usize) -> String {
    let mut text = String::new();
    for i in 0..paragraphs {
        text.push_str(MarkerKind::Headline(HeadlineLevel::H2).encoded());
        text.push_str(&format!("Section {i}\n"));
        text.push_str("Some plain prose with a ");
        text.push_str(MarkerKind::BoldStart.encoded());
        text.push_str("bold run");
        text.push_str(MarkerKind::BoldEnd.encoded());
        text.push_str(" and an ");
        text.push_str(MarkerKind::ItalicStart.encoded());
        text.push_str("italic one");
        text.push_str(MarkerKind::ItalicEnd.encoded());
        text.push_str(".\n");
        for item in ["first", "second", "third"] {
            text.push_str(MarkerKind::UnorderedListItem.encoded());
            text.push_str(item);
            text.push('\n');
        }
    }
    text
}

fn bench_lex_small(c: &mut Criterion) {
    let text = tagged_note(1);
    c.bench_function("lex_small", |b| {
        b.iter(|| Scanner::new(black_box(&text)).count())
    });
}

fn bench_segments_large(c: &mut Criterion) {
    let doc = Document::new(tagged_note(500));
    c.bench_function("segments_large", |b| {
        b.iter(|| black_box(&doc).segments().count())
    });
}

fn bench_headlines_large(c: &mut Criterion) {
    let doc = Document::new(tagged_note(500));
    c.bench_function("headlines_large", |b| {
        b.iter(|| black_box(&doc).headlines())
    });
}

criterion_group!(
    benches,
    bench_lex_small,
    bench_segments_large,
    bench_headlines_large
);
criterion_main!(benches);
