//! cleric-lex - Lexical Analyzer
//!
//! Transforms a preprocessed source string into a stream of [`Token`]s,
//! scanning on demand rather than materializing the whole token list up
//! front. Whitespace is skipped silently; unrecognized characters and the
//! constant-immediately-followed-by-identifier case surface as ordinary
//! `Unknown` tokens rather than errors — lexing only fails if the arena runs
//! out of room to copy a lexeme.

mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
