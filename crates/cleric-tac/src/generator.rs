//! Lowers a validated AST into three-address code.
//!
//! `IrGenerator` is a one-shot stateful walker: one temporary counter, one
//! label counter, and the output instruction list, all reset by
//! constructing a fresh generator per function (this subset has exactly one
//! function per program, but the generator itself doesn't assume that).

use cleric_par::{BinaryOp, Block, BlockItem, Expr, FuncDef, Program, Stmt, UnaryOp, VarDecl};
use cleric_util::Arena;

use crate::error::TacError;
use crate::ir::{Instruction, LabelId, Operand, TacFunction, TacProgram};

pub struct IrGenerator<'a> {
    arena: &'a Arena,
    next_temp: u32,
    next_label: u32,
    instructions: Vec<Instruction<'a>>,
}

impl<'a> IrGenerator<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            next_temp: 0,
            next_label: 0,
            instructions: Vec::new(),
        }
    }

    pub fn generate_program(mut self, program: &Program<'a>) -> Result<TacProgram<'a>, TacError> {
        let func = self.generate_func(&program.func)?;
        Ok(TacProgram { func })
    }

    fn generate_func(&mut self, func: &FuncDef<'a>) -> Result<TacFunction<'a>, TacError> {
        self.generate_block(&func.body)?;
        let instructions = self.arena.alloc_slice_copy(&self.instructions)?;
        Ok(TacFunction {
            name: func.name,
            instructions,
        })
    }

    fn generate_block(&mut self, block: &Block<'a>) -> Result<(), TacError> {
        for item in block.items {
            match item {
                BlockItem::Decl(decl) => self.generate_var_decl(decl)?,
                BlockItem::Stmt(stmt) => self.generate_stmt(stmt)?,
            }
        }
        Ok(())
    }

    fn generate_var_decl(&mut self, decl: &VarDecl<'a>) -> Result<(), TacError> {
        if let Some(init) = decl.init {
            let src = self.lower_expr(init)?;
            self.emit(Instruction::Copy {
                src,
                dst: Operand::Variable(decl.name),
            });
        }
        Ok(())
    }

    fn generate_stmt(&mut self, stmt: &Stmt<'a>) -> Result<(), TacError> {
        match stmt {
            Stmt::Return(expr) => {
                let s = self.lower_expr(expr)?;
                self.emit(Instruction::Return(s));
            }
            Stmt::ExprStmt(expr) => {
                self.lower_expr(expr)?;
            }
            Stmt::Block(block) => self.generate_block(block)?,
        }
        Ok(())
    }

    fn lower_expr(&mut self, expr: &Expr<'a>) -> Result<Operand<'a>, TacError> {
        match expr {
            Expr::IntLiteral(v, _span) => Ok(Operand::Constant(*v)),
            Expr::Identifier(name, _span) => Ok(Operand::Variable(name)),
            Expr::Unary(op, operand, _span) => {
                let s = self.lower_expr(operand)?;
                let t = self.new_temp();
                self.emit(Instruction::Unary { op: *op, src: s, dst: t });
                Ok(t)
            }
            Expr::Binary(op, lhs, rhs, _span) if op.is_short_circuit() => self.lower_short_circuit(*op, lhs, rhs),
            Expr::Binary(op, lhs, rhs, _span) => {
                let sl = self.lower_expr(lhs)?;
                let sr = self.lower_expr(rhs)?;
                let t = self.new_temp();
                self.emit(Instruction::Binary {
                    op: *op,
                    lhs: sl,
                    rhs: sr,
                    dst: t,
                });
                Ok(t)
            }
            Expr::Assignment(target, value, _span) => {
                let name = match target {
                    Expr::Identifier(name, _span) => name,
                    _ => unreachable!("validator rejects non-identifier assignment targets"),
                };
                let s = self.lower_expr(value)?;
                self.emit(Instruction::Copy {
                    src: s,
                    dst: Operand::Variable(name),
                });
                Ok(Operand::Variable(name))
            }
        }
    }

    fn lower_short_circuit(&mut self, op: BinaryOp, lhs: &Expr<'a>, rhs: &Expr<'a>) -> Result<Operand<'a>, TacError> {
        match op {
            BinaryOp::And => {
                let sl = self.lower_expr(lhs)?;
                let l_false = self.new_label();
                let l_end = self.new_label();
                let t = self.new_temp();
                self.emit(Instruction::JumpIfZero {
                    cond: sl,
                    target: l_false,
                });
                let sr = self.lower_expr(rhs)?;
                self.emit(Instruction::Binary {
                    op: BinaryOp::NotEq,
                    lhs: sr,
                    rhs: Operand::Constant(0),
                    dst: t,
                });
                self.emit(Instruction::Jump { target: l_end });
                self.emit(Instruction::Label(l_false));
                self.emit(Instruction::Copy {
                    src: Operand::Constant(0),
                    dst: t,
                });
                self.emit(Instruction::Label(l_end));
                Ok(t)
            }
            BinaryOp::Or => {
                let sl = self.lower_expr(lhs)?;
                let l_true = self.new_label();
                let l_end = self.new_label();
                let t = self.new_temp();
                self.emit(Instruction::JumpIfNotZero {
                    cond: sl,
                    target: l_true,
                });
                let sr = self.lower_expr(rhs)?;
                self.emit(Instruction::Binary {
                    op: BinaryOp::NotEq,
                    lhs: sr,
                    rhs: Operand::Constant(0),
                    dst: t,
                });
                self.emit(Instruction::Jump { target: l_end });
                self.emit(Instruction::Label(l_true));
                self.emit(Instruction::Copy {
                    src: Operand::Constant(1),
                    dst: t,
                });
                self.emit(Instruction::Label(l_end));
                Ok(t)
            }
            _ => unreachable!("called only for And/Or"),
        }
    }

    fn new_temp(&mut self) -> Operand<'a> {
        let id = self.next_temp;
        self.next_temp += 1;
        Operand::Temporary(id)
    }

    fn new_label(&mut self) -> LabelId {
        let id = self.next_label;
        self.next_label += 1;
        LabelId(id)
    }

    fn emit(&mut self, instr: Instruction<'a>) {
        self.instructions.push(instr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleric_par::Parser;
    use cleric_util::Arena;

    fn generate(src: &str) -> TacProgram<'static> {
        let arena = Box::leak(Box::new(Arena::with_capacity(1 << 16)));
        let src: &'static str = Box::leak(src.to_string().into_boxed_str());
        let mut parser = Parser::new(src, arena).unwrap();
        let program = parser.parse_program().unwrap();
        let generator = IrGenerator::new(arena);
        generator.generate_program(&program).unwrap()
    }

    #[test]
    fn literal_return_emits_no_extra_instruction() {
        let tac = generate("int main(void) { return 4; }");
        assert_eq!(tac.func.instructions.len(), 1);
        assert!(matches!(
            tac.func.instructions[0],
            Instruction::Return(Operand::Constant(4))
        ));
    }

    #[test]
    fn unary_negation_emits_one_instruction_per_operator() {
        let tac = generate("int main(void) { return -(-5); }");
        let unary_count = tac
            .func
            .instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Unary { .. }))
            .count();
        assert_eq!(unary_count, 2);
    }

    #[test]
    fn temporaries_are_defined_before_used() {
        let tac = generate("int main(void) { return 1 + 2 * 3; }");
        let mut defined = std::collections::HashSet::new();
        for instr in tac.func.instructions {
            let uses: Vec<Operand> = match instr {
                Instruction::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
                Instruction::Unary { src, .. } => vec![*src],
                Instruction::Return(s) => vec![*s],
                Instruction::Copy { src, .. } => vec![*src],
                _ => vec![],
            };
            for u in uses {
                if let Operand::Temporary(id) = u {
                    assert!(defined.contains(&id), "temporary t{id} used before defined");
                }
            }
            let def = match instr {
                Instruction::Binary { dst: Operand::Temporary(id), .. }
                | Instruction::Unary { dst: Operand::Temporary(id), .. }
                | Instruction::Copy { dst: Operand::Temporary(id), .. } => Some(*id),
                _ => None,
            };
            if let Some(id) = def {
                defined.insert(id);
            }
        }
    }

    #[test]
    fn every_jump_target_has_exactly_one_matching_label() {
        let tac = generate("int main(void) { return 1 && 0; }");
        let targets: Vec<LabelId> = tac
            .func
            .instructions
            .iter()
            .filter_map(|i| match i {
                Instruction::Jump { target }
                | Instruction::JumpIfZero { target, .. }
                | Instruction::JumpIfNotZero { target, .. } => Some(*target),
                _ => None,
            })
            .collect();
        for target in targets {
            let count = tac
                .func
                .instructions
                .iter()
                .filter(|i| matches!(i, Instruction::Label(l) if *l == target))
                .count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn logical_and_short_circuits_with_a_booleanized_fallthrough() {
        let tac = generate("int main(void) { return 1 && 0; }");
        assert!(tac
            .func
            .instructions
            .iter()
            .any(|i| matches!(i, Instruction::JumpIfZero { .. })));
        assert!(tac.func.instructions.iter().any(|i| matches!(
            i,
            Instruction::Binary {
                op: BinaryOp::NotEq,
                ..
            }
        )));
    }
}
