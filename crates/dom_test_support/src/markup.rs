//! Fixture markup reader.
//!
//! Understands the small tag/text subset test fixtures are written in:
//! start tags with optional `name="value"` attributes, end tags, void and
//! self-closing elements, `<!--comments-->` and literal text. No entities,
//! no implied end tags, no error recovery: malformed fixtures are reported
//! as `Err` with the byte offset.
use dom::{Document, NodeKey, NodeType};
use memchr::{memchr, memmem};

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

fn is_void_element(name: &str) -> bool {
    matches!(name, "br" | "hr" | "img" | "input" | "wbr")
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')
}

/// A document built from fixture markup, with lookups for the nodes tests
/// need to name.
pub struct Fixture {
    pub doc: Document,
}

impl Fixture {
    pub fn root(&self) -> NodeKey {
        // `parse_fixture` always creates the root first.
        self.doc.root().unwrap_or(NodeKey::INVALID)
    }

    /// First text node whose data is exactly `text`, in document order.
    pub fn text(&self, text: &str) -> Option<NodeKey> {
        self.doc
            .descendants(self.root())
            .find(|&k| {
                self.doc.node_type(k) == Some(NodeType::Text) && self.doc.text(k) == Some(text)
            })
    }

    /// The `nth` element named `name`, counting from zero in document order.
    pub fn element(&self, name: &str, nth: usize) -> Option<NodeKey> {
        self.doc
            .descendants(self.root())
            .filter(|&k| {
                self.doc.node_type(k) == Some(NodeType::Element)
                    && self.doc.node_name(k).is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .nth(nth)
    }

    pub fn by_id(&self, id: &str) -> Option<NodeKey> {
        self.doc
            .descendants(self.root())
            .find(|&k| self.doc.attr(k, "id") == Some(id))
    }

    /// Resolves a node selector:
    ///
    /// - `root`
    /// - `#id`
    /// - `text:<data>` (first text node with that exact data)
    /// - `<name>` or `<name>:<n>` (the `n`th element with that name)
    pub fn resolve(&self, selector: &str) -> Option<NodeKey> {
        if selector == "root" {
            return Some(self.root());
        }
        if let Some(id) = selector.strip_prefix('#') {
            return self.by_id(id);
        }
        if let Some(text) = selector.strip_prefix("text:") {
            return self.text(text);
        }
        match selector.split_once(':') {
            Some((name, nth)) => self.element(name, nth.parse().ok()?),
            None => self.element(selector, 0),
        }
    }
}

/// Builds a [`Fixture`] from markup. The markup's top-level nodes become
/// children of the document root.
pub fn parse_fixture(markup: &str) -> Result<Fixture, String> {
    let mut doc = Document::with_root();
    let root = doc.root().ok_or("document has no root")?;
    let mut stack: Vec<(NodeKey, String)> = Vec::new();
    let bytes = markup.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let parent = stack.last().map_or(root, |(key, _)| *key);
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(bytes.len(), |rel| i + rel);
            let text = doc.create_text(&markup[i..end]).map_err(|e| e.to_string())?;
            doc.append_child(parent, text).map_err(|e| e.to_string())?;
            i = end;
            continue;
        }

        if markup[i..].starts_with(COMMENT_START) {
            let body = i + COMMENT_START.len();
            let end = memmem::find(&bytes[body..], COMMENT_END.as_bytes())
                .ok_or_else(|| format!("unterminated comment at byte {i}"))?;
            let comment = doc
                .create_comment(&markup[body..body + end])
                .map_err(|e| e.to_string())?;
            doc.append_child(parent, comment).map_err(|e| e.to_string())?;
            i = body + end + COMMENT_END.len();
            continue;
        }

        let close = memchr(b'>', &bytes[i..])
            .map(|rel| i + rel)
            .ok_or_else(|| format!("unterminated tag at byte {i}"))?;
        let tag = &markup[i + 1..close];

        if let Some(name) = tag.strip_prefix('/') {
            let name = name.trim().to_ascii_lowercase();
            match stack.pop() {
                Some((_, open)) if open == name => {}
                Some((_, open)) => {
                    return Err(format!("end tag </{name}> at byte {i} closes <{open}>"));
                }
                None => return Err(format!("stray end tag </{name}> at byte {i}")),
            }
            i = close + 1;
            continue;
        }

        let (tag, self_closing) = match tag.strip_suffix('/') {
            Some(tag) => (tag, true),
            None => (tag, false),
        };
        let name_len = tag.bytes().take_while(|&b| is_name_byte(b)).count();
        if name_len == 0 {
            return Err(format!("missing tag name at byte {i}"));
        }
        let name = tag[..name_len].to_ascii_lowercase();
        let element = doc.create_element(&name).map_err(|e| e.to_string())?;
        for (attr, value) in parse_attributes(&tag[name_len..], i)? {
            doc.set_attribute(element, &attr, &value)
                .map_err(|e| e.to_string())?;
        }
        doc.append_child(parent, element).map_err(|e| e.to_string())?;
        if !self_closing && !is_void_element(&name) {
            stack.push((element, name));
        }
        i = close + 1;
    }

    if let Some((_, open)) = stack.pop() {
        return Err(format!("unclosed <{open}> at end of fixture"));
    }
    Ok(Fixture { doc })
}

fn parse_attributes(input: &str, at: usize) -> Result<Vec<(String, String)>, String> {
    let mut out = Vec::new();
    let mut rest = input.trim_start();
    while !rest.is_empty() {
        let name_len = rest.bytes().take_while(|&b| is_name_byte(b)).count();
        if name_len == 0 {
            return Err(format!("bad attribute in tag at byte {at}"));
        }
        let name = rest[..name_len].to_ascii_lowercase();
        rest = rest[name_len..].trim_start();
        let Some(after_eq) = rest.strip_prefix('=') else {
            out.push((name, String::new()));
            continue;
        };
        let after_eq = after_eq.trim_start();
        let Some(quoted) = after_eq.strip_prefix('"') else {
            return Err(format!("attribute {name} needs a quoted value at byte {at}"));
        };
        let end = memchr(b'"', quoted.as_bytes())
            .ok_or_else(|| format!("unterminated value for {name} at byte {at}"))?;
        out.push((name, quoted[..end].to_string()));
        rest = quoted[end + 1..].trim_start();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_elements_and_text() {
        let fixture = parse_fixture("<p>hello <b>world</b>.</p><p>foo</p>").expect("fixture");
        let doc = &fixture.doc;
        let p1 = fixture.resolve("p").expect("p");
        let p2 = fixture.resolve("p:1").expect("p:1");
        assert_eq!(doc.children(fixture.root()), &[p1, p2]);
        assert_eq!(doc.children(p1).len(), 3);
        let world = fixture.resolve("text:world").expect("world");
        assert_eq!(doc.parent(world), fixture.resolve("b"));
        assert_eq!(fixture.text("foo").and_then(|k| doc.parent(k)), Some(p2));
    }

    #[test]
    fn void_elements_attributes_and_comments() {
        let markup = r#"<p id="x" class="a b"><br>one<img/><!-- note --></p>"#;
        let fixture = parse_fixture(markup).expect("fixture");
        let doc = &fixture.doc;
        let p = fixture.resolve("#x").expect("p");
        assert_eq!(doc.attr(p, "class"), Some("a b"));
        let kids: Vec<_> = doc.children(p).iter().map(|&k| doc.node_name(k)).collect();
        assert_eq!(
            kids,
            vec![Some("br"), Some("#text"), Some("img"), Some("#comment")]
        );
        assert_eq!(doc.text(doc.children(p)[3]), Some(" note "));
    }

    #[test]
    fn malformed_markup_is_rejected() {
        assert!(parse_fixture("<p>open").is_err());
        assert!(parse_fixture("<p></b>").is_err());
        assert!(parse_fixture("</p>").is_err());
        assert!(parse_fixture("<p").is_err());
        assert!(parse_fixture("<!-- open").is_err());
        assert!(parse_fixture(r#"<p id=x></p>"#).is_err());
    }
}
