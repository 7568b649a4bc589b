use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.current_token_kind() {
        TokenKind::Let => parse_let_stmt(parser),
        TokenKind::Return => parse_return_stmt(parser),
        _ => parse_expression_stmt(parser),
    }
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;

    let name = Identifier {
        token: parser.current_token().clone(),
        value: parser.current_token().literal.clone(),
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;

    parser.expect_terminator()?;

    Ok(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();

    let value = if parser.peek_token_kind() == TokenKind::Semicolon || parser.peek_ends_statement()
    {
        None
    } else {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    parser.expect_terminator()?;

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;

    if parser.peek_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// Parses `{ ... }` with the current token on the opening brace, leaving it on the closing one.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.enter_nesting()?;
    let block = parse_block_body(parser);
    parser.leave_nesting();

    block
}

fn parse_block_body(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let token = parser.current_token().clone();
    parser.advance();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::EOF {
            return Err(Error::new(
                ErrorImpl::UnterminatedBlock,
                parser.get_position(),
            ));
        }

        statements.push(parse_stmt(parser)?);
        parser.advance();
    }

    Ok(BlockStmt { token, statements })
}
