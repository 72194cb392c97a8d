use crate::token::Tok;

/// Reflows comment text for a given column; supplied by the caller and never invoked here.
pub trait CommentRewriter: Send + Sync {
    fn rewrite(&self, comment: &Tok, max_width: usize, column: usize) -> String;
}

impl<F> CommentRewriter for F
where
    F: Fn(&Tok, usize, usize) -> String + Send + Sync,
{
    fn rewrite(&self, comment: &Tok, max_width: usize, column: usize) -> String {
        self(comment, max_width, column)
    }
}

/// Leaves comments exactly as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerbatimComments;

impl CommentRewriter for VerbatimComments {
    fn rewrite(&self, comment: &Tok, _max_width: usize, _column: usize) -> String {
        comment.text.clone()
    }
}
