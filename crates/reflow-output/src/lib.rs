#![deny(clippy::unwrap_used)]

// Output side of a source formatter.
//
// Pipeline:
// 1) Build: the layout engine drives an `OutputBuilder` with text, indent, blank-line and
//    boundary directives in source order. Whitespace stays pending until a printable character
//    arrives, and every output line records which source toks reached it.
// 2) Finish: the builder freezes into a `FormattedOutput`.
// 3) Query: the frozen output answers whole-document requests (`lines`, `text`) and partial
//    ones. A partial request is a set of tok ranges; it is snapped to marked boundaries,
//    mapped to byte offsets in the original text, and returned as sorted, non-overlapping
//    `Replacement`s, which `render` splices into the original.

mod blank_lines;
mod boundaries;
mod comments;
mod error;
mod input;
mod merge;
mod options;
mod output;
mod replacement;
mod sink;
mod span;
mod token;

pub use blank_lines::{BlankLineLedger, BlankLineWish, FirstExplicitWins, WishMerge};
pub use boundaries::BoundaryIndex;
pub use comments::{CommentRewriter, VerbatimComments};
pub use error::{OptionsError, ReconcileError};
pub use input::{SourceInput, SourceText};
pub use merge::apply_replacements;
pub use options::OutputOptions;
pub use output::FormattedOutput;
pub use replacement::Replacement;
pub use sink::OutputBuilder;
pub use span::{EMPTY_SPAN, LineSpans, union};
pub use token::{Tok, TokIndex, Token, end_tok, start_position, start_tok};
