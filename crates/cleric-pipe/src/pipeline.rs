//! Single entry point sequencing every phase: lex → parse → validate →
//! generate TAC → generate code. Each `*_only` flag stops the pipeline
//! right after its phase succeeds; on any phase's failure the pipeline
//! returns without writing further to `out` (earlier phases may already
//! have written rendering output for a stop-flag that was never reached,
//! but nothing beyond the failing phase runs).

use cleric_par::Parser;
use cleric_sem::Validator;
use cleric_tac::IrGenerator;
use cleric_util::{Arena, Handler, StringBuffer};

use crate::error::CompileError;
use crate::render::{render_ast, render_tac, render_tokens};

/// Which phase, if any, the pipeline should stop after. `None` (all fields
/// false) runs the whole pipeline through code generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileFlags {
    pub lex_only: bool,
    pub parse_only: bool,
    pub validate_only: bool,
    pub tac_only: bool,
    pub codegen_only: bool,
}

/// Compile `source` according to `flags`, writing the stopped-at phase's
/// artifact (or, with no stop flag, the final assembly) into `out`.
///
/// The arena is owned by the caller for the whole compilation; this
/// function only ever borrows it.
pub fn compile<'a>(
    source: &'a str,
    flags: CompileFlags,
    handler: &Handler,
    out: &StringBuffer<'a>,
    arena: &'a Arena,
) -> Result<(), CompileError> {
    if flags.lex_only {
        render_tokens(source, arena, out)?;
        return Ok(());
    }

    let mut parser = Parser::new(source, arena)?;
    let program = parser.parse_program()?;
    if flags.parse_only {
        render_ast(&program, out)?;
        return Ok(());
    }

    let mut validator = Validator::new(handler);
    if !validator.validate(&program) {
        return Err(CompileError::Semantic);
    }
    if flags.validate_only {
        out.push_str("ok\n")?;
        return Ok(());
    }

    let tac = IrGenerator::new(arena).generate_program(&program)?;
    if flags.tac_only {
        render_tac(&tac, out)?;
        return Ok(());
    }

    cleric_codegen::emit_program(&tac, out)?;
    // codegen_only has nowhere further to stop before: codegen is the last
    // phase the core performs. The flag exists for symmetry with the CLI's
    // other stop-after flags and the driver's own bookkeeping.
    let _ = flags.codegen_only;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str, flags: CompileFlags) -> Result<String, CompileError> {
        let arena = Arena::with_capacity(1 << 16);
        let handler = Handler::new();
        let out = StringBuffer::new(&arena);
        compile(src, flags, &handler, &out, &arena)?;
        Ok(out.as_str().to_string())
    }

    #[test]
    fn full_pipeline_produces_assembly() {
        let asm = run("int main(void) { return 4; }", CompileFlags::default()).unwrap();
        assert!(asm.starts_with(".globl _main\n"));
        assert!(asm.contains("movl $4, %eax"));
    }

    #[test]
    fn lex_only_stops_before_parsing() {
        let out = run(
            "int main(void) { return 4; }",
            CompileFlags {
                lex_only: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(out.contains("Int"));
        assert!(out.contains("Eof"));
    }

    #[test]
    fn validate_only_reports_ok_for_a_well_scoped_program() {
        let out = run(
            "int main(void) { int x = 1; return x; }",
            CompileFlags {
                validate_only: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(out, "ok\n");
    }

    #[test]
    fn undeclared_identifier_fails_with_semantic_error() {
        let err = run(
            "int main(void) { return y; }",
            CompileFlags {
                validate_only: true,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Semantic));
    }

    #[test]
    fn syntax_error_short_circuits_before_validation() {
        let err = run("int main(void) { return 1 + ; }", CompileFlags::default()).unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn out_of_range_literal_is_reported_as_a_parse_error() {
        let err = run("int main(void) { return 2147483648; }", CompileFlags::default()).unwrap_err();
        match err {
            CompileError::Parse(inner) => assert!(inner.to_string().contains("Integer literal out of range")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
