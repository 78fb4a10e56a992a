//! The lexer: turns a source slice into a stream of [`Token`]s on demand.

use cleric_util::Arena;

use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Scans a borrowed source slice into tokens, one at a time.
///
/// The lexer never buffers the whole token stream: `next_token` is called
/// by the parser's one-token lookahead exactly as many times as there are
/// tokens in the source, plus one for the trailing `Eof`. Lexemes that need
/// to outlive the immediate call (identifiers, integer literals, unknown
/// characters) are copied into the arena; everything else is represented by
/// `kind` alone.
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    position: usize,
    arena: &'a Arena,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, arena: &'a Arena) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            position: 0,
            arena,
        }
    }

    /// Restart scanning from the beginning of the source.
    pub fn reset_position(&mut self) {
        self.position = 0;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.position += 1;
        Some(b)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    /// Produce the next token. Returns `Err` only on arena exhaustion while
    /// copying a lexeme; end-of-input and unrecognized characters are
    /// ordinary `Ok` results.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_whitespace();

        let start = self.position;
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, None, start));
        };

        if c.is_ascii_alphabetic() || c == b'_' {
            return self.lex_identifier_or_keyword(start);
        }
        if c.is_ascii_digit() {
            return self.lex_number(start);
        }

        self.lex_punctuation(start)
    }

    fn lex_identifier_or_keyword(&mut self, start: usize) -> Result<Token<'a>, LexError> {
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.position += 1;
            } else {
                break;
            }
        }
        let raw = &self.source[start..self.position];
        if let Some(kind) = Token::reserved_word(raw) {
            return Ok(Token::new(kind, None, start));
        }
        // Only identifiers need to outlive this call into the arena; the
        // keyword branch above never attaches a lexeme.
        let lexeme = self.arena.alloc_str(raw)?;
        Ok(Token::new(TokenKind::Ident, Some(lexeme), start))
    }

    fn lex_number(&mut self, start: usize) -> Result<Token<'a>, LexError> {
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                self.position += 1;
            } else {
                break;
            }
        }

        // "Constant immediately followed by identifier" rule: 1foo lexes as
        // an unknown token pointing at the offending 'f', not as `1` `foo`.
        if let Some(b) = self.peek() {
            if b.is_ascii_alphabetic() || b == b'_' {
                let bad_offset = self.position;
                self.position += 1;
                let lexeme = self.arena.alloc_str(&self.source[bad_offset..bad_offset + 1])?;
                return Ok(Token::new(TokenKind::Unknown, Some(lexeme), bad_offset));
            }
        }

        let text = self.arena.alloc_str(&self.source[start..self.position])?;
        Ok(Token::new(TokenKind::IntLiteral, Some(text), start))
    }

    fn lex_punctuation(&mut self, start: usize) -> Result<Token<'a>, LexError> {
        let c = self.advance().expect("caller checked peek()");
        let next = self.peek();

        macro_rules! two_char {
            ($second:expr, $kind:expr) => {
                if next == Some($second) {
                    self.position += 1;
                    return Ok(Token::new($kind, None, start));
                }
            };
        }

        // The disambiguation table checks `--` before any single-character
        // punctuation, but this subset has no decrement operator and no
        // token kind for it: two consecutive `-` characters simply lex as
        // two independent `Minus` tokens (e.g. double negation `- -5`).
        match c {
            b'<' => two_char!(b'=', TokenKind::Le),
            b'>' => two_char!(b'=', TokenKind::Ge),
            b'=' => two_char!(b'=', TokenKind::EqEq),
            b'!' => two_char!(b'=', TokenKind::NotEq),
            b'&' => two_char!(b'&', TokenKind::AndAnd),
            b'|' => two_char!(b'|', TokenKind::OrOr),
            _ => {}
        }

        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b';' => TokenKind::Semicolon,
            b'~' => TokenKind::Tilde,
            b'-' => TokenKind::Minus,
            b'+' => TokenKind::Plus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'=' => TokenKind::Eq,
            b'!' => TokenKind::Bang,
            b',' => TokenKind::Comma,
            _ => {
                let lexeme = self.arena.alloc_str(&self.source[start..start + 1])?;
                return Ok(Token::new(TokenKind::Unknown, Some(lexeme), start));
            }
        };
        Ok(Token::new(kind, None, start))
    }
}
