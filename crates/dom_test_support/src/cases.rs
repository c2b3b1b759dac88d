//! TOML case files for range iteration tests.
//!
//! ```toml
//! format = "range-iter-cases-v1"
//!
//! [[case]]
//! name = "text across paragraphs"
//! markup = "<p>hello <b>world</b>.</p><p>foo</p>"
//! start = { node = "text:hello ", offset = 2 }
//! end = { node = "text:foo", offset = 2 }
//! select = ["#text"]
//! expected = ['"hello "', '"world"', '"."', '"foo"']
//! stringify = "llo world.fo"
//! ```
//!
//! Node selectors are those of [`Fixture::resolve`](crate::Fixture::resolve).
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const RANGE_CASES_FORMAT_V1: &str = "range-iter-cases-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CaseFile {
    format: String,
    #[serde(rename = "case", default)]
    cases: Vec<RangeCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RangeCase {
    pub name: String,
    pub markup: String,
    pub start: BoundarySpec,
    pub end: BoundarySpec,
    /// `#text`, `#comment`, `#element` or a tag name. OR-combined.
    #[serde(default)]
    pub select: Vec<String>,
    #[serde(default)]
    pub reject: Vec<String>,
    #[serde(default = "default_revisit")]
    pub revisit: bool,
    /// Node labels, as produced by [`node_label`](crate::node_label).
    pub expected: Vec<String>,
    #[serde(default)]
    pub stringify: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BoundarySpec {
    pub node: String,
    pub offset: usize,
}

fn default_revisit() -> bool {
    true
}

pub fn parse_range_cases(content: &str, origin: &str) -> Vec<RangeCase> {
    let file: CaseFile = toml::from_str(content)
        .unwrap_or_else(|err| panic!("failed to parse range cases {origin}: {err}"));
    assert_eq!(
        file.format, RANGE_CASES_FORMAT_V1,
        "unsupported format in {origin}"
    );
    assert!(!file.cases.is_empty(), "range cases {origin} has no cases");
    let mut names = std::collections::BTreeSet::new();
    for case in &file.cases {
        assert!(
            names.insert(case.name.as_str()),
            "duplicate case name '{}' in {origin}",
            case.name
        );
    }
    file.cases
}

pub fn load_range_cases(path: &Path) -> Vec<RangeCase> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read range cases {path:?}: {err}"));
    parse_range_cases(&content, &format!("{path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cases_with_defaults() {
        let cases = parse_range_cases(
            r##"
format = "range-iter-cases-v1"

[[case]]
name = "one"
markup = "<p>a</p>"
start = { node = "text:a", offset = 0 }
end = { node = "text:a", offset = 1 }
expected = ['"a"']
"##,
            "inline",
        );
        assert_eq!(cases.len(), 1);
        let case = &cases[0];
        assert!(case.revisit);
        assert!(case.select.is_empty());
        assert_eq!(case.stringify, None);
        assert_eq!(
            case.start,
            BoundarySpec {
                node: "text:a".to_string(),
                offset: 0
            }
        );
    }

    #[test]
    #[should_panic(expected = "unsupported format")]
    fn rejects_unknown_format() {
        parse_range_cases(
            r#"
format = "other"

[[case]]
name = "one"
markup = ""
start = { node = "root", offset = 0 }
end = { node = "root", offset = 0 }
expected = []
"#,
            "inline",
        );
    }

    #[test]
    #[should_panic(expected = "duplicate case name")]
    fn rejects_duplicate_names() {
        let case = r#"
[[case]]
name = "same"
markup = ""
start = { node = "root", offset = 0 }
end = { node = "root", offset = 0 }
expected = []
"#;
        parse_range_cases(
            &format!("format = \"range-iter-cases-v1\"\n{case}{case}"),
            "inline",
        );
    }
}
