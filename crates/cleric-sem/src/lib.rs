//! cleric-sem - Semantic Validator
//!
//! Checks declare-before-use and no-redeclaration-in-scope over the parsed
//! AST. Does not build any new tree; it only walks the one it is handed and
//! reports through a shared diagnostic handler.

mod error;
mod symtab;
mod validator;

pub use error::SemaError;
pub use symtab::SymbolTable;
pub use validator::Validator;
