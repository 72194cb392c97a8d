/// Identity of a [`Tok`] in the token stream.
///
/// Real toks (identifiers, punctuation, comments) are numbered densely from zero in source
/// order. Whitespace and other trivia carry no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokIndex {
    Real(usize),
    Trivia,
}

impl TokIndex {
    pub fn real(self) -> Option<usize> {
        match self {
            TokIndex::Real(index) => Some(index),
            TokIndex::Trivia => None,
        }
    }

    pub fn is_real(self) -> bool {
        matches!(self, TokIndex::Real(_))
    }
}

/// Smallest lexical unit: a real token, a comment, or a run of trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tok {
    pub index: TokIndex,
    /// Byte offset of the first byte of `text` in the original document.
    pub position: usize,
    pub text: String,
}

impl Tok {
    pub fn real(index: usize, position: usize, text: impl Into<String>) -> Self {
        Self {
            index: TokIndex::Real(index),
            position,
            text: text.into(),
        }
    }

    pub fn trivia(position: usize, text: impl Into<String>) -> Self {
        Self {
            index: TokIndex::Trivia,
            position,
            text: text.into(),
        }
    }

    /// Byte offset just past the tok.
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }
}

/// A real tok together with the trivia (and attached comments) around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tok: Tok,
    pub toks_before: Vec<Tok>,
    pub toks_after: Vec<Tok>,
}

impl Token {
    pub fn new(tok: Tok) -> Self {
        Self {
            tok,
            toks_before: Vec::new(),
            toks_after: Vec::new(),
        }
    }

    /// Every tok of the token in source order.
    pub fn toks(&self) -> impl Iterator<Item = &Tok> {
        self.toks_before
            .iter()
            .chain(std::iter::once(&self.tok))
            .chain(self.toks_after.iter())
    }
}

/// The earliest byte position of any tok in the token, leading whitespace included.
pub fn start_position(token: &Token) -> usize {
    token
        .toks_before
        .iter()
        .map(|tok| tok.position)
        .fold(token.tok.position, usize::min)
}

/// The first non-trivia tok of the token; a leading comment wins over the token itself.
pub fn start_tok(token: &Token) -> &Tok {
    token
        .toks_before
        .iter()
        .find(|tok| tok.index.is_real())
        .unwrap_or(&token.tok)
}

/// The last non-trivia tok of the token; a trailing comment wins over the token itself.
pub fn end_tok(token: &Token) -> &Tok {
    token
        .toks_after
        .iter()
        .rev()
        .find(|tok| tok.index.is_real())
        .unwrap_or(&token.tok)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commented_token() -> Token {
        Token {
            tok: Tok::real(1, 10, "x"),
            toks_before: vec![
                Tok::trivia(2, "\n  "),
                Tok::real(0, 5, "/**/"),
                Tok::trivia(9, " "),
            ],
            toks_after: vec![
                Tok::trivia(11, " "),
                Tok::real(2, 12, "// tail"),
                Tok::trivia(19, "\n"),
            ],
        }
    }

    #[test]
    fn start_and_end_skip_trivia() {
        let token = commented_token();
        assert_eq!(start_tok(&token).index, TokIndex::Real(0));
        assert_eq!(end_tok(&token).index, TokIndex::Real(2));
        assert_eq!(end_tok(&token).end(), 19);
    }

    #[test]
    fn bare_token_is_its_own_start_and_end() {
        let mut token = Token::new(Tok::real(4, 3, "y"));
        token.toks_before.push(Tok::trivia(0, "   "));
        assert_eq!(start_tok(&token), &token.tok);
        assert_eq!(end_tok(&token), &token.tok);
        assert_eq!(start_position(&token), 0);
    }

    #[test]
    fn start_position_includes_leading_whitespace() {
        assert_eq!(start_position(&commented_token()), 2);
        assert_eq!(commented_token().toks().count(), 7);
    }
}
