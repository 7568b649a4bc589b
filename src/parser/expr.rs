use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr,
            IntegerLiteral, PrefixExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Parses an expression whose operators all bind tighter than `bp`.
///
/// Starts on the expression's first token and leaves the current token on its last.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let expr = parse_nested_expr(parser, bp);
    parser.leave_nesting();

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud(token_kind) {
        Some(nud) => nud,
        None if token_kind == TokenKind::Illegal => {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: parser.current_token().literal.clone(),
                },
                parser.get_position(),
            ))
        }
        None => {
            return Err(Error::new(
                ErrorImpl::NoPrefixParser { kind: token_kind },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than bp, keep extending lhs
    while parser.peek_binding_power() > bp {
        let Some(led) = parser.get_led(parser.peek_token_kind()) else {
            return Ok(left);
        };

        parser.advance();
        left = led(parser, left)?;
    }

    Ok(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    Ok(Expr::Identifier(Identifier {
        value: token.literal.clone(),
        token,
    }))
}

pub fn parse_integer_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.literal.parse::<i64>() {
        Ok(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError {
                token: token.literal,
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_boolean_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    Ok(Expr::Boolean(BooleanLiteral {
        value: token.kind == TokenKind::True,
        token,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

/// Binary operators are left associative: the right operand is parsed at the
/// operator's own binding power.
pub fn parse_infix_expr(parser: &mut Parser, left: Expr) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    let bp = parser.current_binding_power();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `if (<condition>) { ... } [else { ... }]`
pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let consequence = parse_block_stmt(parser)?;

    let alternative = if parser.peek_token_kind() == TokenKind::Else {
        parser.advance();
        parser.expect_peek(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(IfExpr {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    }))
}

/// `fn(<params>) { ... }`
pub fn parse_function_literal(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    parser.expect_peek(TokenKind::OpenParen)?;
    let parameters = parse_function_parameters(parser)?;

    parser.expect_peek(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(FunctionLiteral {
        token,
        parameters,
        body,
    }))
}

fn parse_function_parameters(parser: &mut Parser) -> Result<Vec<Identifier>, Error> {
    let mut parameters = Vec::new();

    if parser.peek_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(parameters);
    }

    loop {
        parser.expect_peek(TokenKind::Identifier)?;
        parameters.push(Identifier {
            token: parser.current_token().clone(),
            value: parser.current_token().literal.clone(),
        });

        if parser.peek_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(parameters)
}

/// `<function>(<args>)`, entered with the current token on `(`.
pub fn parse_call_expr(parser: &mut Parser, left: Expr) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let mut arguments = Vec::new();

    if parser.peek_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default)?);

        while parser.peek_token_kind() == TokenKind::Comma {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Default)?);
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token,
        function: Box::new(left),
        arguments,
    }))
}
