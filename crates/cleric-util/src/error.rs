//! Shared error types for `cleric-util` itself. Each phase crate defines its
//! own error enum for its own failure modes (see `cleric-lex::LexError`,
//! `cleric-par::ParseError`, `cleric-sem::ValidateError`,
//! `cleric-codegen::CodegenError`); this crate only owns the resource-level
//! error produced by the arena.

use thiserror::Error;

/// Failure to satisfy an arena allocation request.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena exhausted: requested {requested} bytes, {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
}
