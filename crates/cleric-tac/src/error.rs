use cleric_util::ArenaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TacError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
}
