//! cleric-util - Arena, string buffer, and diagnostics.
//!
//! Every other crate in this workspace borrows its compile-time data from
//! the [`Arena`] defined here, and reports errors through the [`Handler`] /
//! [`Diagnostic`] / [`Span`] triple. Nothing in this crate knows about
//! tokens, AST nodes, or assembly — it is pure infrastructure, shared by the
//! lexer, parser, validator, IR generator, and code generator alike.

pub mod arena;
pub mod diag;
pub mod error;
pub mod strbuf;

pub use arena::Arena;
pub use diag::{Diagnostic, Handler, Level, Span};
pub use error::ArenaError;
pub use strbuf::StringBuffer;
