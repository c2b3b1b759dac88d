#![no_main]

use dom::{Document, NodeKey, NodeType, StaticRange};
use libfuzzer_sys::fuzz_target;
use range_iter::RangeIterator;

/// Grows a tree from the input: each byte picks a node kind and a parent
/// among the elements created so far.
fn build(data: &[u8]) -> Option<(Document, Vec<NodeKey>)> {
    let mut doc = Document::with_root();
    let root = doc.root()?;
    let mut parents = vec![root];
    let mut nodes = vec![root];
    for &byte in data {
        let parent = parents[usize::from(byte >> 2) % parents.len()];
        let key = match byte & 0b11 {
            0 | 1 => {
                let key = doc.create_element(if byte & 1 == 0 { "p" } else { "b" }).ok()?;
                parents.push(key);
                key
            }
            2 => doc.create_text("text").ok()?,
            _ => doc.create_comment("c").ok()?,
        };
        doc.append_child(parent, key).ok()?;
        nodes.push(key);
    }
    Some((doc, nodes))
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }
    let (picks, body) = data.split_at(2);
    let Some((doc, nodes)) = build(body) else {
        return;
    };
    let a = nodes[usize::from(picks[0]) % nodes.len()];
    let b = nodes[usize::from(picks[1]) % nodes.len()];
    let range = StaticRange::new(a, 0, b, 0);
    let Ok(iter) = RangeIterator::from_range(&doc, &range) else {
        return;
    };
    let mut iter = iter.select(NodeType::Text).select(NodeType::Element);
    let resolver = iter.resolver();

    let mut steps = 0usize;
    while let Some(node) = iter.next() {
        assert!(resolver.within_range(&doc, node.key()));
        steps += 1;
        // Every node has two tag sides at most.
        assert!(steps <= 2 * doc.len());
    }
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
});
