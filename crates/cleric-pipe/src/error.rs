use cleric_codegen::CodegenError;
use cleric_lex::LexError;
use cleric_par::ParseError;
use cleric_tac::TacError;
use cleric_util::ArenaError;
use thiserror::Error;

/// Unifies every phase's failure into the one channel the pipeline returns.
/// Phases run in order and the first failure wins — nothing downstream of
/// it ever runs.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("semantic validation failed")]
    Semantic,

    #[error(transparent)]
    Tac(#[from] TacError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Arena(#[from] ArenaError),
}
