//! cleric-codegen - Code Generator
//!
//! Turns three-address code into AT&T-syntax x86-64 assembly text for
//! macOS: every temporary and variable gets a fixed stack slot computed by
//! scanning the instruction list once, there is no register allocator, and
//! the frame size follows the `(M+1)*8` formula rounded to 16 bytes with a
//! 32-byte floor.

mod emit;
mod error;
mod frame;

pub use emit::emit_program;
pub use error::CodegenError;
pub use frame::StackLayout;

#[cfg(test)]
mod tests {
    use cleric_par::Parser;
    use cleric_tac::IrGenerator;
    use cleric_util::{Arena, StringBuffer};

    fn compile_to_asm(src: &str) -> String {
        let arena = Arena::with_capacity(1 << 16);
        let mut parser = Parser::new(src, &arena).unwrap();
        let program = parser.parse_program().unwrap();
        let tac = IrGenerator::new(&arena).generate_program(&program).unwrap();
        let out = StringBuffer::new(&arena);
        super::emit_program(&tac, &out).unwrap();
        out.as_str().to_string()
    }

    #[test]
    fn literal_return_matches_the_expected_prologue_and_body() {
        let asm = compile_to_asm("int main(void) { return 4; }");
        assert_eq!(
            asm,
            ".globl _main\n_main:\npushq %rbp\nmovq %rsp, %rbp\nsubq $32, %rsp\nmovl $4, %eax\nleave\nretq\n"
        );
    }

    #[test]
    fn double_negation_emits_exactly_one_negl() {
        let asm = compile_to_asm("int main(void) { return -((((10)))); }");
        assert_eq!(asm.matches("negl %eax").count(), 1);
        assert!(asm.contains("movl -8(%rbp), %eax"));
    }

    #[test]
    fn multiplication_is_evaluated_before_addition() {
        let asm = compile_to_asm("int main(void) { return 1 + 2 * 3; }");
        let mul_pos = asm.find("imull $3, %eax").unwrap();
        let add_pos = asm.find("addl").unwrap();
        assert!(mul_pos < add_pos);
    }

    #[test]
    fn relational_comparison_uses_setl() {
        let asm = compile_to_asm("int main(void) { return 10 < 5; }");
        assert!(asm.contains("cmpl $5, %eax"));
        assert!(asm.contains("setl %al"));
        assert!(asm.contains("movzbl %al, %eax"));
    }

    #[test]
    fn variable_declaration_copies_before_return_loads_it() {
        let asm = compile_to_asm("int main(void) { int x = 10; return x; }");
        let copy_pos = asm.find("movl $10, -8(%rbp)").unwrap();
        let load_pos = asm.find("movl -8(%rbp), %eax").unwrap();
        assert!(copy_pos < load_pos);
    }

    #[test]
    fn frame_size_is_always_a_multiple_of_16_and_at_least_32() {
        for src in [
            "int main(void) { return 0; }",
            "int main(void) { int a; int b; int c; int d; int e; return a + b + c + d + e; }",
        ] {
            let asm = compile_to_asm(src);
            let line = asm.lines().find(|l| l.starts_with("subq")).unwrap();
            let n: usize = line
                .trim_start_matches("subq $")
                .trim_end_matches(", %rsp")
                .parse()
                .unwrap();
            assert_eq!(n % 16, 0);
            assert!(n >= 32);
        }
    }
}
