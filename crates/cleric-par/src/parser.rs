//! Recursive-descent parser. Each grammar rule in the language's written
//! grammar gets its own function, named after the rule rather than folded
//! into a generic binding-power loop — `parse_logical_or` calls
//! `parse_logical_and` calls ... calls `parse_primary`, mirroring precedence
//! levels the same way the grammar lists them.

use cleric_lex::{Lexer, Token, TokenKind};
use cleric_util::Arena;

use crate::ast::{BinaryOp, Block, BlockItem, Expr, FuncDef, Program, Stmt, UnaryOp, VarDecl};
use crate::error::ParseError;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    arena: &'a Arena,
    current: Token<'a>,
    lookahead: Token<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, arena: &'a Arena) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source, arena);
        let current = lexer.next_token()?;
        let lookahead = lexer.next_token()?;
        Ok(Self {
            lexer,
            arena,
            current,
            lookahead,
        })
    }

    fn bump(&mut self) -> Result<Token<'a>, ParseError> {
        let consumed = self.current;
        self.current = self.lookahead;
        self.lookahead = self.lexer.next_token()?;
        Ok(consumed)
    }

    fn err_here(&self, detail: impl Into<String>) -> ParseError {
        ParseError::syntax(self.current.offset(), detail)
    }

    /// Consume the current token if it has kind `expected`, else fail naming
    /// what was actually found.
    fn expect(&mut self, expected: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.current.kind == expected {
            self.bump()
        } else {
            Err(self.err_here(format!(
                "expected {}, found {}",
                describe_kind(expected),
                describe(&self.current)
            )))
        }
    }

    pub fn parse_program(&mut self) -> Result<Program<'a>, ParseError> {
        let func = self.parse_func_def()?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.err_here(format!("expected end of input, found {}", describe(&self.current))));
        }
        Ok(Program { func })
    }

    fn parse_func_def(&mut self) -> Result<FuncDef<'a>, ParseError> {
        let start = self.current.offset();
        self.expect(TokenKind::Int)?;
        let name_tok = self.expect(TokenKind::Ident)?;
        let name = name_tok.lexeme.expect("Ident token always carries a lexeme");
        self.expect(TokenKind::LParen)?;
        if self.current.kind == TokenKind::Void {
            self.bump()?;
        }
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let end = self.current.offset();
        Ok(FuncDef {
            name,
            body,
            span: cleric_util::Span::new(start, end.saturating_sub(start)),
        })
    }

    fn parse_block(&mut self) -> Result<Block<'a>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut items = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            if self.current.kind == TokenKind::Eof {
                return Err(self.err_here("unexpected end of input, expected '}'"));
            }
            items.push(self.parse_block_item()?);
        }
        self.expect(TokenKind::RBrace)?;
        let items = self.arena.alloc_slice_copy(&items)?;
        Ok(Block { items })
    }

    fn parse_block_item(&mut self) -> Result<BlockItem<'a>, ParseError> {
        if self.current.kind == TokenKind::Int {
            Ok(BlockItem::Decl(self.parse_var_decl()?))
        } else {
            Ok(BlockItem::Stmt(self.parse_statement()?))
        }
    }

    fn parse_var_decl(&mut self) -> Result<VarDecl<'a>, ParseError> {
        let start = self.current.offset();
        self.expect(TokenKind::Int)?;
        let name_tok = self.expect(TokenKind::Ident)?;
        let name = name_tok.lexeme.expect("Ident token always carries a lexeme");
        let init = if self.current.kind == TokenKind::Eq {
            self.bump()?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        let end = self.current.offset();
        self.expect(TokenKind::Semicolon)?;
        let ty_name = self.arena.alloc_str("int")?;
        Ok(VarDecl {
            ty_name,
            name,
            init,
            span: cleric_util::Span::new(start, end.saturating_sub(start)),
        })
    }

    fn parse_statement(&mut self) -> Result<Stmt<'a>, ParseError> {
        match self.current.kind {
            TokenKind::Return => {
                self.bump()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Return(expr))
            }
            TokenKind::Semicolon => {
                // An empty statement isn't represented in the AST: skip it
                // and parse whatever follows as the "real" statement.
                self.bump()?;
                self.parse_statement()
            }
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let block = self.arena.alloc(block)?;
                Ok(Stmt::Block(block))
            }
            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Stmt::ExprStmt(expr))
            }
        }
    }

    fn parse_expression(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        self.parse_assignment()
    }

    /// Assignment is right-associative and binds loosest of all the
    /// operators: `a = b = c` parses as `a = (b = c)`.
    fn parse_assignment(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let lhs = self.parse_logical_or()?;
        if self.current.kind == TokenKind::Eq {
            let op_offset = self.current.offset();
            self.bump()?;
            if !matches!(lhs, Expr::Identifier(_, _)) {
                return Err(ParseError::syntax(
                    lhs.span().offset.max(op_offset.saturating_sub(1)),
                    "invalid assignment target",
                ));
            }
            let rhs = self.parse_assignment()?;
            let span = cleric_util::Span::new(lhs.span().offset, rhs.span().offset + rhs.span().len - lhs.span().offset);
            return Ok(self.arena.alloc(Expr::Assignment(lhs, rhs, span))?);
        }
        Ok(lhs)
    }

    fn parse_logical_or(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut lhs = self.parse_logical_and()?;
        while self.current.kind == TokenKind::OrOr {
            self.bump()?;
            let rhs = self.parse_logical_and()?;
            lhs = self.alloc_binary(BinaryOp::Or, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_logical_and(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut lhs = self.parse_equality()?;
        while self.current.kind == TokenKind::AndAnd {
            self.bump()?;
            let rhs = self.parse_equality()?;
            lhs = self.alloc_binary(BinaryOp::And, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.current.kind {
                TokenKind::EqEq => BinaryOp::EqEq,
                TokenKind::NotEq => BinaryOp::NotEq,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_relational()?;
            lhs = self.alloc_binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Le => BinaryOp::Le,
                TokenKind::Ge => BinaryOp::Ge,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_additive()?;
            lhs = self.alloc_binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_multiplicative()?;
            lhs = self.alloc_binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.bump()?;
            let rhs = self.parse_unary()?;
            lhs = self.alloc_binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        let op = match self.current.kind {
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::Tilde => UnaryOp::Complement,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        let start = self.current.offset();
        self.bump()?;
        let operand = self.parse_unary()?;
        let operand_span = operand.span();
        let span = cleric_util::Span::new(start, (operand_span.offset + operand_span.len).saturating_sub(start));
        Ok(self.arena.alloc(Expr::Unary(op, operand, span))?)
    }

    fn parse_primary(&mut self) -> Result<&'a Expr<'a>, ParseError> {
        match self.current.kind {
            TokenKind::IntLiteral => {
                let tok = self.bump()?;
                let text = tok.lexeme.expect("IntLiteral token always carries a lexeme");
                let value: i64 = text
                    .parse()
                    .expect("lexer guarantees an all-digit lexeme for IntLiteral");
                if value > i32::MAX as i64 {
                    return Err(ParseError::syntax(tok.offset(), "Integer literal out of range"));
                }
                let span = cleric_util::Span::new(tok.offset(), text.len());
                Ok(self.arena.alloc(Expr::IntLiteral(value as i32, span))?)
            }
            TokenKind::Ident => {
                let tok = self.bump()?;
                let name = tok.lexeme.expect("Ident token always carries a lexeme");
                let span = cleric_util::Span::new(tok.offset(), name.len());
                Ok(self.arena.alloc(Expr::Identifier(name, span))?)
            }
            TokenKind::LParen => {
                self.bump()?;
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.err_here(format!("unexpected token {}", describe(&self.current)))),
        }
    }

    fn alloc_binary(&self, op: BinaryOp, lhs: &'a Expr<'a>, rhs: &'a Expr<'a>) -> Result<&'a Expr<'a>, ParseError> {
        let lhs_span = lhs.span();
        let rhs_span = rhs.span();
        let span = cleric_util::Span::new(lhs_span.offset, (rhs_span.offset + rhs_span.len).saturating_sub(lhs_span.offset));
        Ok(self.arena.alloc(Expr::Binary(op, lhs, rhs, span))?)
    }
}

fn describe(tok: &Token<'_>) -> String {
    match tok.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::Ident | TokenKind::IntLiteral | TokenKind::Unknown => {
            format!("'{}'", tok.lexeme.unwrap_or_default())
        }
        other => describe_kind(other).to_string(),
    }
}

fn describe_kind(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Int => "'int'",
        TokenKind::Void => "'void'",
        TokenKind::Return => "'return'",
        TokenKind::Ident => "an identifier",
        TokenKind::IntLiteral => "an integer literal",
        TokenKind::LParen => "'('",
        TokenKind::RParen => "')'",
        TokenKind::LBrace => "'{'",
        TokenKind::RBrace => "'}'",
        TokenKind::Semicolon => "';'",
        TokenKind::Eq => "'='",
        TokenKind::Comma => "','",
        TokenKind::Tilde => "'~'",
        TokenKind::Minus => "'-'",
        TokenKind::Plus => "'+'",
        TokenKind::Star => "'*'",
        TokenKind::Slash => "'/'",
        TokenKind::Percent => "'%'",
        TokenKind::Lt => "'<'",
        TokenKind::Gt => "'>'",
        TokenKind::Le => "'<='",
        TokenKind::Ge => "'>='",
        TokenKind::EqEq => "'=='",
        TokenKind::NotEq => "'!='",
        TokenKind::AndAnd => "'&&'",
        TokenKind::OrOr => "'||'",
        TokenKind::Bang => "'!'",
        TokenKind::Eof => "end of input",
        TokenKind::Unknown => "an unrecognized character",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr};

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let arena = Arena::with_capacity(1 << 16);
        let src = "int main(void) { return 1 + 2 * 3; }";
        let mut parser = Parser::new(src, &arena).unwrap();
        let program = parser.parse_program().unwrap();
        let expr = match program.func.body.items[0] {
            BlockItem::Stmt(Stmt::Return(expr)) => expr,
            _ => panic!("expected a return statement"),
        };
        match expr {
            Expr::Binary(BinaryOp::Add, lhs, rhs, _) => {
                assert!(matches!(lhs, Expr::IntLiteral(1, _)));
                assert!(matches!(rhs, Expr::Binary(BinaryOp::Mul, _, _, _)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn additive_operators_are_left_associative() {
        let arena = Arena::with_capacity(1 << 16);
        let src = "int main(void) { return 1 - 2 - 3; }";
        let mut parser = Parser::new(src, &arena).unwrap();
        let program = parser.parse_program().unwrap();
        let expr = match program.func.body.items[0] {
            BlockItem::Stmt(Stmt::Return(expr)) => expr,
            _ => panic!("expected a return statement"),
        };
        match expr {
            Expr::Binary(BinaryOp::Sub, lhs, rhs, _) => {
                assert!(matches!(lhs, Expr::Binary(BinaryOp::Sub, _, _, _)));
                assert!(matches!(rhs, Expr::IntLiteral(3, _)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        let arena = Arena::with_capacity(1 << 16);
        let src = "int main(void) { int a; int b; a = b = 5; return 0; }";
        let mut parser = Parser::new(src, &arena).unwrap();
        let program = parser.parse_program().unwrap();
        match program.func.body.items[2] {
            BlockItem::Stmt(Stmt::ExprStmt(Expr::Assignment(_, rhs, _))) => {
                assert!(matches!(rhs, Expr::Assignment(_, _, _)));
            }
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn assigning_to_a_non_identifier_is_rejected() {
        let arena = Arena::with_capacity(1 << 16);
        let src = "int main(void) { a + 3 = 4; return 0; }";
        let mut parser = Parser::new(src, &arena).unwrap();
        let err = parser.parse_program().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn out_of_range_integer_literal_is_rejected() {
        let arena = Arena::with_capacity(1 << 16);
        let src = "int main(void) { return 2147483648; }";
        let mut parser = Parser::new(src, &arena).unwrap();
        let err = parser.parse_program().unwrap_err();
        match err {
            ParseError::Syntax { detail, .. } => assert_eq!(detail, "Integer literal out of range"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_operand_names_the_unexpected_token() {
        let arena = Arena::with_capacity(1 << 16);
        let src = "int main(void) { return 1 + ; }";
        let mut parser = Parser::new(src, &arena).unwrap();
        let err = parser.parse_program().unwrap_err();
        match err {
            ParseError::Syntax { detail, .. } => assert!(detail.contains("';'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nested_blocks_parse() {
        let arena = Arena::with_capacity(1 << 16);
        let src = "int main(void) { { int x = 1; } return 0; }";
        let mut parser = Parser::new(src, &arena).unwrap();
        let program = parser.parse_program().unwrap();
        assert!(matches!(program.func.body.items[0], BlockItem::Stmt(Stmt::Block(_))));
    }
}
