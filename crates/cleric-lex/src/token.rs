//! Token kinds and the `Token` record itself.

use cleric_util::Span;

/// The tag half of a [`Token`].
///
/// Keywords, punctuation, end-of-input, and unknown characters carry no
/// payload beyond their kind; identifiers, integer literals, and unknown
/// tokens additionally carry a lexeme (see [`Token::lexeme`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Int,
    Void,
    Return,

    // Identifier / literal
    Ident,
    IntLiteral,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Eq,
    Comma,
    Tilde,
    Minus,
    Plus,
    Star,
    Slash,
    Percent,
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    Bang,

    Eof,
    Unknown,
}

/// A single lexical token.
///
/// `lexeme` is `Some` only for `Ident`, `IntLiteral`, and `Unknown` — every
/// other kind is fully determined by `kind` alone, so carrying a lexeme for
/// e.g. `Plus` would be redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: Option<&'a str>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: Option<&'a str>, offset: usize) -> Self {
        let len = lexeme.map(str::len).unwrap_or(0);
        Self {
            kind,
            lexeme,
            span: Span::new(offset, len),
        }
    }

    pub fn offset(&self) -> usize {
        self.span.offset
    }

    /// Is `text` one of the reserved words? Keywords never carry a lexeme
    /// (the kind alone determines their spelling), so this only needs to
    /// hand back a `TokenKind`, not a whole `Token`.
    pub fn reserved_word(text: &str) -> Option<TokenKind> {
        match text {
            "int" => Some(TokenKind::Int),
            "void" => Some(TokenKind::Void),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }
}
