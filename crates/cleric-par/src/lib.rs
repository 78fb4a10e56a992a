//! cleric-par - Parser
//!
//! Recursive-descent parser producing a closed-sum-type AST, arena-owned
//! throughout. The parser holds a one-token lookahead and propagates
//! failures as `Result<_, ParseError>` rather than the sticky error-flag
//! style older stage compilers in this family used — the grammar here is
//! small enough that `?` threading through each rule function reads cleanly
//! without a pervasive mutable-state check after every call.

mod ast;
mod error;
mod parser;

pub use ast::{BinaryOp, Block, BlockItem, Expr, FuncDef, Program, Stmt, UnaryOp, VarDecl};
pub use error::ParseError;
pub use parser::Parser;
