//! cleric-tac - Three-Address Code
//!
//! Lowers the validated AST into a flat per-function instruction list with
//! explicit jumps and labels — no basic-block graph, no control-flow
//! analysis. The code generator consumes this list directly.

mod error;
mod generator;
mod ir;

pub use error::TacError;
pub use generator::IrGenerator;
pub use ir::{Instruction, LabelId, Operand, TacFunction, TacProgram};
