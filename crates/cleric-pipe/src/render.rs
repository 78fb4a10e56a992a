//! Renders the intermediate artifact produced by whichever phase a
//! `*_only` flag stopped the pipeline at. These are debug views for the
//! `--lex`/`--parse`/`--tac` CLI flags, not part of the wire format of
//! anything downstream.

use cleric_lex::{Lexer, TokenKind};
use cleric_par::Program;
use cleric_tac::TacProgram;
use cleric_util::{Arena, ArenaError, StringBuffer};

use crate::error::CompileError;

pub fn render_tokens<'a>(source: &'a str, arena: &'a Arena, out: &StringBuffer<'a>) -> Result<(), CompileError> {
    let mut lexer = Lexer::new(source, arena);
    loop {
        let tok = lexer.next_token()?;
        match tok.lexeme {
            Some(lexeme) => out.push_fmt(format_args!("{:?} {:?}\n", tok.kind, lexeme))?,
            None => out.push_fmt(format_args!("{:?}\n", tok.kind))?,
        }
        if tok.kind == TokenKind::Eof {
            break;
        }
    }
    Ok(())
}

pub fn render_ast<'a>(program: &Program<'a>, out: &StringBuffer<'a>) -> Result<(), ArenaError> {
    out.push_fmt(format_args!("{program:#?}\n"))
}

pub fn render_tac<'a>(tac: &TacProgram<'a>, out: &StringBuffer<'a>) -> Result<(), ArenaError> {
    out.push_fmt(format_args!("{tac:#?}\n"))
}
