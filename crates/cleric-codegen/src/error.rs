use cleric_util::ArenaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
}
