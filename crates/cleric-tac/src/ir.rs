//! Three-address code: a flat instruction list per function, no basic-block
//! structure. Every instruction refers to its operands by value (constant,
//! temporary id, or variable name) rather than by pointer into the AST —
//! the IR is a standalone artifact the code generator can scan and re-scan
//! without walking back through the tree it came from.

use cleric_par::{BinaryOp, UnaryOp};

/// A value an instruction reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    Constant(i32),
    Temporary(u32),
    Variable(&'a str),
}

/// A jump target. Labels are numbered independently of temporaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

#[derive(Debug, Clone, Copy)]
pub enum Instruction<'a> {
    Copy {
        src: Operand<'a>,
        dst: Operand<'a>,
    },
    Unary {
        op: UnaryOp,
        src: Operand<'a>,
        dst: Operand<'a>,
    },
    /// `op` is never `And`/`Or` here — those are lowered by the generator
    /// into the short-circuit jump sequence below, never emitted as a
    /// single binary instruction.
    Binary {
        op: BinaryOp,
        lhs: Operand<'a>,
        rhs: Operand<'a>,
        dst: Operand<'a>,
    },
    Jump {
        target: LabelId,
    },
    JumpIfZero {
        cond: Operand<'a>,
        target: LabelId,
    },
    JumpIfNotZero {
        cond: Operand<'a>,
        target: LabelId,
    },
    Label(LabelId),
    Return(Operand<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct TacFunction<'a> {
    pub name: &'a str,
    pub instructions: &'a [Instruction<'a>],
}

#[derive(Debug, Clone, Copy)]
pub struct TacProgram<'a> {
    pub func: TacFunction<'a>,
}
