//! Textual pattern wrapping over typeset markup.
//!
//! A pattern is matched against the markup string literally, except that
//! operator characters tolerate optional whitespace on either side (so the
//! pattern `"=c"` still finds `"a + b = c"`). Every match is enclosed in the
//! zero-footprint marker `\bbox[0px]{...}` that the typesetting engine treats
//! as an invisible measurement anchor. No markup grammar is parsed here.

use regex::Regex;

use crate::foundation::error::{ChalkError, ChalkResult};

/// Opening token of the zero-footprint marker group.
pub const MARKER_OPEN: &str = "\\bbox[0px]{";

/// Characters that tolerate surrounding whitespace when matched.
const OPERATORS: &[char] = &[
    '=', '+', '-', '*', '/', '^', '<', '>', '≤', '≥', '≠', '±', '×', '÷',
];

/// One marker region within a wrapped markup string, in byte offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerSpan {
    /// Start of the opening token.
    pub open_start: usize,
    /// Start of the enclosed content.
    pub content_start: usize,
    /// Offset of the matching closing brace.
    pub close: usize,
}

/// Translate a textual pattern into its whitespace-tolerant regex source.
fn tolerant_source(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut buf = [0u8; 4];
    for ch in pattern.chars() {
        let literal = regex::escape(ch.encode_utf8(&mut buf));
        if OPERATORS.contains(&ch) {
            out.push_str(r"\s*");
            out.push_str(&literal);
            out.push_str(r"\s*");
        } else {
            out.push_str(&literal);
        }
    }
    out
}

/// Scan the marker regions of a wrapped string in document order.
///
/// Content braces are balanced, so wrapped groups like `\frac{a}{b}` stay
/// inside one span. An unterminated marker ends the scan.
pub fn marker_spans(markup: &str) -> Vec<MarkerSpan> {
    let mut spans = Vec::new();
    let mut from = 0;
    while let Some(found) = markup[from..].find(MARKER_OPEN) {
        let open_start = from + found;
        let content_start = open_start + MARKER_OPEN.len();
        let mut depth = 1usize;
        let mut close = None;
        for (i, ch) in markup[content_start..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(content_start + i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else { break };
        spans.push(MarkerSpan {
            open_start,
            content_start,
            close,
        });
        from = close + 1;
    }
    spans
}

/// Number of marker regions in a wrapped string.
pub fn marker_count(markup: &str) -> usize {
    marker_spans(markup).len()
}

/// Wrap every match of `pattern` in `markup` with the zero-footprint marker,
/// preserving the exact matched substring (including its actual whitespace).
///
/// Text already enclosed by an earlier wrap is never re-matched; neither is
/// the marker syntax itself.
pub fn wrap_pattern(markup: &str, pattern: &str) -> ChalkResult<String> {
    if pattern.is_empty() {
        return Err(ChalkError::selection("selection pattern must be non-empty"));
    }
    let re = Regex::new(&tolerant_source(pattern))
        .map_err(|e| ChalkError::selection(format!("invalid selection pattern: {e}")))?;

    let protected = marker_spans(markup);
    let overlaps_marker = |start: usize, end: usize| {
        protected
            .iter()
            .any(|sp| start < sp.close + 1 && sp.open_start < end)
    };

    let mut out = String::with_capacity(markup.len() + MARKER_OPEN.len());
    let mut last = 0usize;
    for m in re.find_iter(markup) {
        if m.start() < last || m.as_str().is_empty() || overlaps_marker(m.start(), m.end()) {
            continue;
        }
        out.push_str(&markup[last..m.start()]);
        out.push_str(MARKER_OPEN);
        out.push_str(m.as_str());
        out.push('}');
        last = m.end();
    }
    out.push_str(&markup[last..]);
    Ok(out)
}

/// Apply several patterns in argument order. Each pattern matches against the
/// progressively wrapped string, so a later pattern cannot re-match text an
/// earlier wrap already enclosed.
pub fn wrap_patterns(markup: &str, patterns: &[String]) -> ChalkResult<String> {
    let mut wrapped = markup.to_string();
    for pattern in patterns {
        wrapped = wrap_pattern(&wrapped, pattern)?;
    }
    Ok(wrapped)
}

/// Remove every marker, restoring the original markup exactly.
pub fn strip_markers(markup: &str) -> String {
    let spans = marker_spans(markup);
    if spans.is_empty() {
        return markup.to_string();
    }
    let mut out = String::with_capacity(markup.len());
    let mut last = 0usize;
    for sp in spans {
        out.push_str(&markup[last..sp.open_start]);
        out.push_str(&markup[sp.content_start..sp.close]);
        last = sp.close + 1;
    }
    out.push_str(&markup[last..]);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/markup/pattern.rs"]
mod tests;
