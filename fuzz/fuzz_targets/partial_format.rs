//! Fuzz target: partial formatting.
//!
//! Invariants checked:
//! - Lexing, layout and edit planning never panic, even on garbage input.
//! - Edits are sorted, disjoint, inside the document and on char boundaries.
//! - Text outside the edits reaches the merged document unchanged.
//! - Requesting every token reproduces the full output; only the whitespace ahead of the
//!   first token may differ.

#![no_main]

use std::ops::Range;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reflow_output::SourceInput;

#[path = "../../crates/reflow-output/tests/support/mod.rs"]
mod support;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    requests: Vec<(u8, u8)>,
}

fuzz_target!(|input: Input| {
    // Cap input size to keep iterations fast.
    if input.text.len() > 16 * 1024 || input.requests.len() > 16 {
        return;
    }
    let text = input.text.as_str();
    let source = support::lex(text);
    let output = support::layout(&source);
    let requests: Vec<Range<usize>> = input
        .requests
        .iter()
        .map(|&(start, len)| usize::from(start)..usize::from(start) + usize::from(len))
        .collect();

    let edits = output
        .compute_replacements(&requests)
        .expect("every token stream marks its first statement");
    let mut cursor = 0;
    for edit in &edits {
        let range = edit.range();
        assert!(cursor <= range.start, "edits overlap at {range:?}");
        assert!(range.start <= range.end && range.end <= text.len());
        assert!(text.is_char_boundary(range.start) && text.is_char_boundary(range.end));
        cursor = range.end;
    }

    let merged = output.render_to_string(&requests).expect("merge");
    let mut untouched = 0;
    let mut merged_at = 0;
    for edit in &edits {
        let kept = &text[untouched..edit.range().start];
        assert_eq!(&merged[merged_at..merged_at + kept.len()], kept);
        merged_at += kept.len() + edit.text().len();
        untouched = edit.range().end;
    }
    assert_eq!(&merged[merged_at..], &text[untouched..]);

    if source.token_count() > 0 {
        let full = output
            .render_to_string(&[support::everything(&source)])
            .expect("full merge");
        let formatted = output.text();
        let body = formatted.trim_start();
        assert!(full.ends_with(body), "{full:?} does not end with {body:?}");
        assert!(full[..full.len() - body.len()].trim().is_empty());
    }
});
