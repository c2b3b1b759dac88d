use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dom::{Document, NodeKey, NodeType, StaticRange};
use range_iter::RangeIterator;

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

/// `blocks` copies of `<div><span>hello</span><br>tail</div>` under the root.
/// Returns the first and last text nodes.
fn make_blocks(blocks: usize) -> (Document, NodeKey, NodeKey) {
    let mut doc = Document::with_root();
    let root = doc.root().expect("root");
    let mut first = None;
    let mut last = root;
    for _ in 0..blocks {
        let div = doc.create_element("div").expect("div");
        let span = doc.create_element("span").expect("span");
        let hello = doc.create_text("hello").expect("text");
        let br = doc.create_element("br").expect("br");
        let tail = doc.create_text("tail").expect("text");
        doc.append_child(root, div).expect("append");
        doc.append_child(div, span).expect("append");
        doc.append_child(span, hello).expect("append");
        doc.append_child(div, br).expect("append");
        doc.append_child(div, tail).expect("append");
        first.get_or_insert(hello);
        last = tail;
    }
    (doc, first.unwrap_or(root), last)
}

fn bench_texts_small(c: &mut Criterion) {
    let (doc, first, last) = make_blocks(SMALL_BLOCKS);
    let range = StaticRange::new(first, 0, last, 4);
    c.bench_function("bench_range_texts_small", |b| {
        b.iter(|| {
            let it = RangeIterator::from_range(black_box(&doc), &range)
                .expect("iterator")
                .select(NodeType::Text);
            black_box(it.count());
        });
    });
}

fn bench_texts_large(c: &mut Criterion) {
    let (doc, first, last) = make_blocks(LARGE_BLOCKS);
    let range = StaticRange::new(first, 0, last, 4);
    c.bench_function("bench_range_texts_large", |b| {
        b.iter(|| {
            let it = RangeIterator::from_range(black_box(&doc), &range)
                .expect("iterator")
                .revisit(false)
                .select(NodeType::Text)
                .select("br");
            black_box(it.count());
        });
    });
}

fn bench_narrow_range_in_wide_document(c: &mut Criterion) {
    let (doc, first, _) = make_blocks(LARGE_BLOCKS);
    let range = StaticRange::new(first, 0, first, 5);
    c.bench_function("bench_range_narrow_in_large", |b| {
        b.iter(|| {
            let it = RangeIterator::from_range(black_box(&doc), &range)
                .expect("iterator")
                .select(NodeType::Text);
            black_box(it.count());
        });
    });
}

criterion_group!(
    benches,
    bench_texts_small,
    bench_texts_large,
    bench_narrow_range_in_wide_document
);
criterion_main!(benches);
