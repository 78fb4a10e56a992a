//! Stack-frame layout: assigns every temporary and variable a fixed slot
//! below `%rbp` and computes the frame size the prologue reserves.
//!
//! This is a fixed-formula layout, not a register allocator: every TAC value
//! gets its own 8-byte slot for the lifetime of the function, and the map is
//! built once up front by scanning the instruction list. Simpler, and
//! byte-exact with what the assembly output is expected to look like, at
//! the cost of using more stack than a liveness-aware allocator would.

use cleric_tac::{Instruction, Operand, TacFunction};

/// Size of one stack slot, matching the 32-bit (`l`-suffix) operand width
/// used throughout the generated instructions.
const SLOT_BYTES: usize = 8;
const MIN_FRAME_BYTES: usize = 32;

pub struct StackLayout<'a> {
    /// Variable names in first-use order, each given a slot after every
    /// temporary slot.
    variables: Vec<&'a str>,
    max_temp: Option<u32>,
    frame_bytes: usize,
}

impl<'a> StackLayout<'a> {
    pub fn build(func: &TacFunction<'a>) -> Self {
        let mut max_temp = None;
        let mut variables: Vec<&'a str> = Vec::new();

        for instr in func.instructions {
            match instr {
                Instruction::Copy { src, dst } => {
                    note_operand(src, &mut max_temp, &mut variables);
                    note_operand(dst, &mut max_temp, &mut variables);
                }
                Instruction::Unary { src, dst, .. } => {
                    note_operand(src, &mut max_temp, &mut variables);
                    note_operand(dst, &mut max_temp, &mut variables);
                }
                Instruction::Binary { lhs, rhs, dst, .. } => {
                    note_operand(lhs, &mut max_temp, &mut variables);
                    note_operand(rhs, &mut max_temp, &mut variables);
                    note_operand(dst, &mut max_temp, &mut variables);
                }
                Instruction::JumpIfZero { cond, .. } | Instruction::JumpIfNotZero { cond, .. } => {
                    note_operand(cond, &mut max_temp, &mut variables);
                }
                Instruction::Return(s) => note_operand(s, &mut max_temp, &mut variables),
                Instruction::Jump { .. } | Instruction::Label(_) => {}
            }
        }

        let temp_count = max_temp.map(|m| m as usize + 1).unwrap_or(0);
        let slot_count = temp_count + variables.len();
        let raw_bytes = slot_count * SLOT_BYTES;
        let frame_bytes = round_up_16(raw_bytes).max(MIN_FRAME_BYTES);

        Self {
            variables,
            max_temp,
            frame_bytes,
        }
    }

    pub fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }

    /// Byte offset (positive) below `%rbp` for a temporary's slot.
    pub fn temp_offset(&self, id: u32) -> usize {
        SLOT_BYTES * (id as usize + 1)
    }

    /// Byte offset (positive) below `%rbp` for a named variable's slot.
    /// Variable slots are appended after every temporary slot, in the
    /// order each variable was first referenced.
    pub fn variable_offset(&self, name: &str) -> usize {
        let temp_count = self.max_temp.map(|m| m as usize + 1).unwrap_or(0);
        let index = self
            .variables
            .iter()
            .position(|&v| v == name)
            .expect("variable referenced in codegen but absent from layout scan");
        SLOT_BYTES * (temp_count + index + 1)
    }

    pub fn slot_of(&self, op: &Operand<'_>) -> Option<usize> {
        match op {
            Operand::Temporary(id) => Some(self.temp_offset(*id)),
            Operand::Variable(name) => Some(self.variable_offset(name)),
            Operand::Constant(_) => None,
        }
    }
}

fn round_up_16(bytes: usize) -> usize {
    (bytes + 15) & !15
}

fn note_operand<'a>(op: &Operand<'a>, max_temp: &mut Option<u32>, variables: &mut Vec<&'a str>) {
    match op {
        Operand::Temporary(id) => {
            *max_temp = Some(max_temp.map_or(*id, |m: u32| m.max(*id)));
        }
        Operand::Variable(name) => {
            if !variables.contains(name) {
                variables.push(name);
            }
        }
        Operand::Constant(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_function_gets_minimum_frame() {
        let func = TacFunction {
            name: "main",
            instructions: &[],
        };
        let layout = StackLayout::build(&func);
        assert_eq!(layout.frame_bytes(), 32);
    }

    #[test]
    fn frame_size_rounds_up_to_16() {
        let instrs = [Instruction::Return(Operand::Temporary(2))];
        let func = TacFunction {
            name: "main",
            instructions: &instrs,
        };
        let layout = StackLayout::build(&func);
        // 3 temporaries * 8 = 24, rounds up to 32.
        assert_eq!(layout.frame_bytes(), 32);
    }

    #[test]
    fn variables_are_slotted_after_temporaries() {
        let instrs = [
            Instruction::Copy {
                src: Operand::Constant(1),
                dst: Operand::Variable("x"),
            },
            Instruction::Binary {
                op: cleric_par::BinaryOp::Add,
                lhs: Operand::Variable("x"),
                rhs: Operand::Constant(1),
                dst: Operand::Temporary(0),
            },
            Instruction::Return(Operand::Temporary(0)),
        ];
        let func = TacFunction {
            name: "main",
            instructions: &instrs,
        };
        let layout = StackLayout::build(&func);
        assert_eq!(layout.temp_offset(0), 8);
        assert_eq!(layout.variable_offset("x"), 16);
    }
}
