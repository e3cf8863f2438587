//! Benchmarks for cached and uncached book serialization.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quire_book::{Book, Page, Serializable};
use quire_text::{ClickEvent, Color, TextComponent};

/// Generate a page with `children` styled nested components.
fn generate_page(index: usize, children: usize) -> Page {
    let mut component = TextComponent::new(format!("Chapter {index}\n")).with_bold(true);
    for child in 0..children {
        component = component.with_child(
            TextComponent::new(format!("Line {child} of chapter {index}. "))
                .with_color(Color::DarkBlue)
                .with_click_event(ClickEvent::change_page(index + 1)),
        );
    }
    Page::new(component)
}

fn generate_book(pages: usize) -> Book {
    let pages: Vec<Page> = (0..pages).map(|i| generate_page(i, 8)).collect();
    Book::from_pages(&pages).unwrap()
}

fn bench_serialize_uncached(c: &mut Criterion) {
    let mut group = c.benchmark_group("book_serialize_uncached");
    for pages in [1, 10, 50] {
        let book = generate_book(pages);
        group.bench_with_input(BenchmarkId::from_parameter(pages), &book, |b, book| {
            b.iter(|| book.serialize().unwrap());
        });
    }
    group.finish();
}

fn bench_serialized_form_cached(c: &mut Criterion) {
    let book = generate_book(50);
    book.serialized_form().unwrap();

    c.bench_function("book_serialized_form_cached_50", |b| {
        b.iter(|| book.serialized_form().unwrap().len());
    });
}

fn bench_modify_then_serialize(c: &mut Criterion) {
    let mut book = generate_book(50);

    c.bench_function("book_modify_then_serialize_50", |b| {
        b.iter(|| {
            book.modify_page(25, |component| component.with_italic(true))
                .unwrap();
            book.serialized_form().unwrap().len()
        });
    });
}

fn bench_page_snapshot(c: &mut Criterion) {
    let page = generate_page(0, 32);

    c.bench_function("page_to_immutable_copy", |b| {
        b.iter(|| page.to_immutable_copy().unwrap());
    });
}

criterion_group!(
    benches,
    bench_serialize_uncached,
    bench_serialized_form_cached,
    bench_modify_then_serialize,
    bench_page_snapshot
);
criterion_main!(benches);
