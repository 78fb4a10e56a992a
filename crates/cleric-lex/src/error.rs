use cleric_util::ArenaError;
use thiserror::Error;

/// Lexical-analysis failure. Unknown characters and end-of-input are
/// ordinary token kinds, not errors (see `TokenKind::Unknown`/`Eof`) — the
/// only way lexing itself fails is running out of arena space for a
/// lexeme copy.
#[derive(Debug, Error)]
pub enum LexError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
}
