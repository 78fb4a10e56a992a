use cleric_lex::LexError;
use cleric_util::ArenaError;
use thiserror::Error;

/// A syntactic failure. The `Syntax` message text is load-bearing: it is
/// exactly the format the CLI prints to stderr (spec calls for
/// `"Parse Error (near pos N): <detail>"`).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parse Error (near pos {offset}): {detail}")]
    Syntax { offset: usize, detail: String },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Arena(#[from] ArenaError),
}

impl ParseError {
    pub fn syntax(offset: usize, detail: impl Into<String>) -> Self {
        ParseError::Syntax {
            offset,
            detail: detail.into(),
        }
    }
}
