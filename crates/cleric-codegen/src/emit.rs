//! Translates a [`TacFunction`] into AT&T-syntax x86-64 assembly text,
//! written directly into a [`StringBuffer`] rather than built up as an
//! intermediate `Vec` of instructions — there is no further pass over the
//! generated text, so there is nothing to gain from a structured
//! representation of it.

use cleric_par::{BinaryOp, UnaryOp};
use cleric_tac::{Instruction, LabelId, Operand, TacFunction, TacProgram};
use cleric_util::StringBuffer;

use crate::error::CodegenError;
use crate::frame::StackLayout;

pub fn emit_program<'a>(program: &TacProgram<'a>, out: &StringBuffer<'a>) -> Result<(), CodegenError> {
    emit_function(&program.func, out)
}

fn emit_function<'a>(func: &TacFunction<'a>, out: &StringBuffer<'a>) -> Result<(), CodegenError> {
    let layout = StackLayout::build(func);

    out.push_fmt(format_args!(".globl _{}\n", func.name))?;
    out.push_fmt(format_args!("_{}:\n", func.name))?;
    out.push_str("pushq %rbp\n")?;
    out.push_str("movq %rsp, %rbp\n")?;
    out.push_fmt(format_args!("subq ${}, %rsp\n", layout.frame_bytes()))?;

    for instr in func.instructions {
        emit_instruction(instr, &layout, out)?;
    }

    Ok(())
}

fn emit_instruction<'a>(instr: &Instruction<'a>, layout: &StackLayout<'a>, out: &StringBuffer<'a>) -> Result<(), CodegenError> {
    match instr {
        Instruction::Copy { src, dst } => {
            let dst_operand = mem_operand(dst, layout);
            match src {
                Operand::Constant(c) => out.push_fmt(format_args!("movl ${c}, {dst_operand}\n"))?,
                _ => {
                    let src_operand = mem_operand(src, layout);
                    out.push_fmt(format_args!("movl {src_operand}, %eax\n"))?;
                    out.push_fmt(format_args!("movl %eax, {dst_operand}\n"))?;
                }
            }
        }
        Instruction::Unary { op, src, dst } => {
            let dst_operand = mem_operand(dst, layout);
            let src_operand = operand_text(src, layout);
            out.push_fmt(format_args!("movl {src_operand}, %eax\n"))?;
            match op {
                UnaryOp::Negate => out.push_str("negl %eax\n")?,
                UnaryOp::Complement => out.push_str("notl %eax\n")?,
                UnaryOp::Not => {
                    out.push_str("cmpl $0, %eax\n")?;
                    out.push_str("sete %al\n")?;
                    out.push_str("movzbl %al, %eax\n")?;
                }
            }
            out.push_fmt(format_args!("movl %eax, {dst_operand}\n"))?;
        }
        Instruction::Binary { op, lhs, rhs, dst } => emit_binary(*op, lhs, rhs, dst, layout, out)?,
        Instruction::Jump { target } => out.push_fmt(format_args!("jmp {}\n", label_text(*target)))?,
        Instruction::JumpIfZero { cond, target } => {
            let operand = operand_text(cond, layout);
            out.push_fmt(format_args!("movl {operand}, %eax\n"))?;
            out.push_str("testl %eax, %eax\n")?;
            out.push_fmt(format_args!("jz {}\n", label_text(*target)))?;
        }
        Instruction::JumpIfNotZero { cond, target } => {
            let operand = operand_text(cond, layout);
            out.push_fmt(format_args!("movl {operand}, %eax\n"))?;
            out.push_str("testl %eax, %eax\n")?;
            out.push_fmt(format_args!("jnz {}\n", label_text(*target)))?;
        }
        Instruction::Label(label) => out.push_fmt(format_args!("{}:\n", label_text(*label)))?,
        Instruction::Return(s) => {
            let operand = operand_text(s, layout);
            out.push_fmt(format_args!("movl {operand}, %eax\n"))?;
            out.push_str("leave\n")?;
            out.push_str("retq\n")?;
        }
    }
    Ok(())
}

fn emit_binary<'a>(
    op: BinaryOp,
    lhs: &Operand<'a>,
    rhs: &Operand<'a>,
    dst: &Operand<'a>,
    layout: &StackLayout<'a>,
    out: &StringBuffer<'a>,
) -> Result<(), CodegenError> {
    let dst_operand = mem_operand(dst, layout);
    let lhs_operand = operand_text(lhs, layout);
    let rhs_operand = operand_text(rhs, layout);

    match op {
        BinaryOp::Add => {
            out.push_fmt(format_args!("movl {lhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("addl {rhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("movl %eax, {dst_operand}\n"))?;
        }
        BinaryOp::Sub => {
            out.push_fmt(format_args!("movl {lhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("subl {rhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("movl %eax, {dst_operand}\n"))?;
        }
        BinaryOp::Mul => {
            out.push_fmt(format_args!("movl {lhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("imull {rhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("movl %eax, {dst_operand}\n"))?;
        }
        BinaryOp::Div => {
            out.push_fmt(format_args!("movl {lhs_operand}, %eax\n"))?;
            out.push_str("cltd\n")?;
            out.push_fmt(format_args!("idivl {rhs_operand}\n"))?;
            out.push_fmt(format_args!("movl %eax, {dst_operand}\n"))?;
        }
        BinaryOp::Mod => {
            out.push_fmt(format_args!("movl {lhs_operand}, %eax\n"))?;
            out.push_str("cltd\n")?;
            out.push_fmt(format_args!("idivl {rhs_operand}\n"))?;
            out.push_fmt(format_args!("movl %edx, {dst_operand}\n"))?;
        }
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::EqEq | BinaryOp::NotEq => {
            let cc = condition_code(op);
            out.push_fmt(format_args!("movl {lhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("cmpl {rhs_operand}, %eax\n"))?;
            out.push_fmt(format_args!("set{cc} %al\n"))?;
            out.push_str("movzbl %al, %eax\n")?;
            out.push_fmt(format_args!("movl %eax, {dst_operand}\n"))?;
        }
        BinaryOp::And | BinaryOp::Or => {
            unreachable!("the IR generator lowers && and || away before codegen sees them")
        }
    }
    Ok(())
}

fn condition_code(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Lt => "l",
        BinaryOp::Gt => "g",
        BinaryOp::Le => "le",
        BinaryOp::Ge => "ge",
        BinaryOp::EqEq => "e",
        BinaryOp::NotEq => "ne",
        _ => unreachable!("condition_code only called for relational/equality operators"),
    }
}

/// Render an operand as either an immediate or a memory reference — used
/// wherever `idivl`/`cmpl`/etc. take either form directly, without forcing
/// the value through `%eax` first.
fn operand_text<'a>(op: &Operand<'a>, layout: &StackLayout<'a>) -> String {
    match op {
        Operand::Constant(c) => format!("${c}"),
        _ => mem_operand(op, layout),
    }
}

/// Render an operand as its stack-slot memory reference. Only ever called
/// for a destination (which is never a constant) or, via `operand_text`,
/// for a source that turned out to be a temporary/variable.
fn mem_operand<'a>(op: &Operand<'a>, layout: &StackLayout<'a>) -> String {
    let offset = layout.slot_of(op).expect("destination operand is never a constant");
    format!("-{offset}(%rbp)")
}

fn label_text(label: LabelId) -> String {
    format!("L{}", label.0)
}
