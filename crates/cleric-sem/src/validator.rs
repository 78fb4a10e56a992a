//! Walks the AST checking declare-before-use and no-redeclaration rules.
//!
//! The validator never builds a second tree and never mutates the one it's
//! given; it only threads a [`SymbolTable`] through the walk and reports
//! through a shared [`Handler`]. A single boolean is handed back to the
//! caller — per-error detail lives only in what was emitted to the sink.

use cleric_par::{Block, BlockItem, Expr, FuncDef, Program, Stmt, VarDecl};
use cleric_util::{Diagnostic, Handler, Span};

use crate::error::SemaError;
use crate::symtab::SymbolTable;

pub struct Validator<'h, 'a> {
    handler: &'h Handler,
    table: SymbolTable<'a>,
}

impl<'h, 'a> Validator<'h, 'a> {
    pub fn new(handler: &'h Handler) -> Self {
        Self {
            handler,
            table: SymbolTable::new(),
        }
    }

    /// Validate a whole program. Returns `true` iff no semantic error was
    /// reported; detailed messages go to the handler regardless.
    pub fn validate(&mut self, program: &Program<'a>) -> bool {
        self.visit_program(program);
        !self.handler.has_errors()
    }

    fn report(&self, err: SemaError) {
        let offset = match &err {
            SemaError::Undeclared { offset, .. }
            | SemaError::Redeclared { offset, .. }
            | SemaError::InvalidAssignmentTarget { offset } => *offset,
        };
        self.handler.emit(&Diagnostic::error(err.to_string(), Span::point(offset)));
    }

    fn visit_program(&mut self, program: &Program<'a>) {
        self.visit_func_def(&program.func);
    }

    fn visit_func_def(&mut self, func: &FuncDef<'a>) {
        self.table.enter_scope();
        self.visit_block(&func.body);
        self.table.exit_scope();
    }

    fn visit_block(&mut self, block: &Block<'a>) {
        for item in block.items {
            match item {
                BlockItem::Decl(decl) => self.visit_var_decl(decl),
                BlockItem::Stmt(stmt) => self.visit_stmt(stmt),
            }
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDecl<'a>) {
        if self.table.declared_in_current_scope(decl.name) {
            self.report(SemaError::Redeclared {
                name: decl.name.to_string(),
                offset: decl.span.offset,
            });
            return;
        }
        self.table.declare(decl.name);
        if let Some(init) = decl.init {
            self.visit_expr(init);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt<'a>) {
        match stmt {
            Stmt::Return(expr) => self.visit_expr(expr),
            Stmt::ExprStmt(expr) => self.visit_expr(expr),
            Stmt::Block(block) => {
                self.table.enter_scope();
                self.visit_block(block);
                self.table.exit_scope();
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr<'a>) {
        match expr {
            Expr::IntLiteral(_, _) => {}
            Expr::Identifier(name, span) => {
                if !self.table.is_in_scope(name) {
                    self.report(SemaError::Undeclared {
                        name: name.to_string(),
                        offset: span.offset,
                    });
                }
            }
            Expr::Unary(_op, operand, _span) => self.visit_expr(operand),
            Expr::Binary(_op, lhs, rhs, _span) => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            Expr::Assignment(target, value, span) => {
                match target {
                    Expr::Identifier(name, _span) => {
                        if !self.table.is_in_scope(name) {
                            self.report(SemaError::Undeclared {
                                name: name.to_string(),
                                offset: target.span().offset,
                            });
                        }
                    }
                    _ => self.report(SemaError::InvalidAssignmentTarget { offset: span.offset }),
                }
                self.visit_expr(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleric_par::Parser;
    use cleric_util::Arena;

    fn validate(src: &str) -> bool {
        let arena = Arena::with_capacity(1 << 16);
        let mut parser = Parser::new(src, &arena).unwrap();
        let program = parser.parse_program().unwrap();
        let handler = Handler::new();
        let mut validator = Validator::new(&handler);
        validator.validate(&program)
    }

    #[test]
    fn accepts_declare_before_use() {
        assert!(validate("int main(void) { int x = 1; return x; }"));
    }

    #[test]
    fn rejects_use_before_declare() {
        assert!(!validate("int main(void) { return x; int x = 1; }"));
    }

    #[test]
    fn rejects_redeclaration_in_same_scope() {
        assert!(!validate("int main(void) { int x = 1; int x = 2; return x; }"));
    }

    #[test]
    fn allows_shadowing_in_nested_block() {
        assert!(validate("int main(void) { int x = 1; { int x = 2; return x; } return x; }"));
    }

    #[test]
    fn inner_declaration_does_not_leak_to_outer_scope() {
        assert!(!validate("int main(void) { { int x = 1; } return x; }"));
    }
}
