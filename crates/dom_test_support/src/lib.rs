mod cases;
mod markup;
mod snapshot;

pub use cases::{
    BoundarySpec, RANGE_CASES_FORMAT_V1, RangeCase, load_range_cases, parse_range_cases,
};
pub use markup::{Fixture, parse_fixture};
pub use snapshot::{labels, node_label, tree_lines};

/// Escapes node data for one-line labels: quotes, backslashes and every
/// control character come out as visible escapes.
pub fn escape_text(text: &str) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let short = match ch {
            '\\' => "\\\\",
            '"' => "\\\"",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            ch if ch.is_control() => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", u32::from(ch));
                continue;
            }
            ch => {
                out.push(ch);
                continue;
            }
        };
        out.push_str(short);
    }
    out
}

/// Human-readable report of where two line lists first disagree.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    use std::fmt::Write;
    let missing = "<missing>";
    let line = |lines: &[String], i: usize| {
        lines.get(i).map_or(missing, |s| s.as_str()).to_string()
    };
    let max = expected.len().max(actual.len());
    let mut out = String::new();

    match (0..max).find(|&i| line(expected, i) != line(actual, i)) {
        Some(i) => {
            let start = i.saturating_sub(2);
            let end = (i + 3).min(max);
            let _ = writeln!(
                &mut out,
                "first mismatch at item {} (showing {}..={}):",
                i + 1,
                start + 1,
                end
            );
            for idx in start..end {
                let marker = if idx == i { ">" } else { " " };
                let (left, right) = (line(expected, idx), line(actual, idx));
                let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", idx + 1);
                let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", idx + 1);
            }
        }
        None => {
            let _ = writeln!(&mut out, "no mismatch");
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} items, actual {} items",
        expected.len(),
        actual.len()
    );
    out
}
