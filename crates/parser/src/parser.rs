use crate::ast::{
    BinaryOp, Expr, ExprKind, Literal, Param, Program, Span, Stmt, StmtKind, TypeExpr,
    TypeExprKind, UnaryOp,
};
use chumsky::prelude::*;
use lexer::token::Token;

pub fn parser() -> impl Parser<Token, Program, Error = Simple<Token>> {
    let stmt = stmt_parser();

    stmt.repeated()
        .then_ignore(end())
        .map(|statements| {
            let mut program = Program { statements };
            program.assign_ids();
            program
        })
}

fn ident() -> impl Parser<Token, String, Error = Simple<Token>> + Clone {
    select! { Token::Identifier(name) => name }
}

// Types: uint32, Celsius, []int, [][]byte
fn type_parser() -> impl Parser<Token, TypeExpr, Error = Simple<Token>> + Clone {
    recursive(|ty| {
        let named = ident().map(TypeExprKind::Named);

        let slice = just(Token::LBracket)
            .then(just(Token::RBracket))
            .ignore_then(ty)
            .map(|elem| TypeExprKind::Slice(Box::new(elem)));

        named
            .or(slice)
            .map_with_span(|kind, span: Span| TypeExpr { kind, span })
    })
}

fn stmt_parser() -> impl Parser<Token, Stmt, Error = Simple<Token>> {
    let expr = expr_parser();
    let ty = type_parser();

    recursive(|stmt| {
        let block = stmt
            .clone()
            .repeated()
            .delimited_by(just(Token::LBrace), just(Token::RBrace));

        // var x T | var x T = e | var x = e
        let var_decl = just(Token::Var)
            .ignore_then(ident())
            .then(ty.clone().or_not())
            .then(just(Token::Eq).ignore_then(expr.clone()).or_not())
            .try_map(|((name, ty), value), span: Span| {
                if ty.is_none() && value.is_none() {
                    return Err(Simple::custom(
                        span,
                        format!("declaration of '{}' needs a type or an initializer", name),
                    ));
                }
                Ok(StmtKind::VariableDecl { name, ty, value })
            });

        let type_decl = just(Token::Type)
            .ignore_then(ident())
            .then(ty.clone())
            .map(|(name, ty)| StmtKind::TypeDecl { name, ty });

        // Parameters: (name type, name type)
        let param = ident()
            .then(ty.clone())
            .map_with_span(|(name, ty), span: Span| Param { name, ty, span });

        let function_def = just(Token::Func)
            .ignore_then(ident())
            .then(
                param
                    .separated_by(just(Token::Comma))
                    .allow_trailing()
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .then(ty.clone().or_not())
            .then(block.clone())
            .map(|(((name, params), return_type), body)| StmtKind::FunctionDef {
                name,
                params,
                return_type,
                body,
            });

        let if_stmt = recursive(|if_stmt| {
            let else_branch = just(Token::Else).ignore_then(
                block
                    .clone()
                    .map_with_span(|body, span: Span| Stmt {
                        kind: StmtKind::Block(body),
                        span,
                    })
                    .or(if_stmt),
            );

            just(Token::If)
                .ignore_then(expr.clone())
                .then(block.clone())
                .then(else_branch.or_not())
                .map_with_span(|((condition, then_block), else_block), span: Span| Stmt {
                    kind: StmtKind::If {
                        condition,
                        then_block,
                        else_block: else_block.map(Box::new),
                    },
                    span,
                })
        });

        let for_stmt = just(Token::For)
            .ignore_then(expr.clone().or_not())
            .then(block.clone())
            .map(|(condition, body)| StmtKind::For { condition, body });

        let return_stmt = just(Token::Return)
            .ignore_then(expr.clone().or_not())
            .map(StmtKind::Return);

        let short_decl = ident()
            .then_ignore(just(Token::ColonEq))
            .then(expr.clone())
            .map(|(name, value)| StmtKind::ShortDecl { name, value });

        let assignment = expr
            .clone()
            .then_ignore(just(Token::Eq))
            .then(expr.clone())
            .map(|(target, value)| StmtKind::Assignment { target, value });

        let block_stmt = block.map(StmtKind::Block);

        let expr_stmt = expr.clone().map(StmtKind::Expr);

        let simple = var_decl
            .or(type_decl)
            .or(function_def)
            .or(for_stmt)
            .or(return_stmt)
            .or(short_decl)
            .or(assignment)
            .or(block_stmt)
            .or(expr_stmt)
            .map_with_span(|kind, span: Span| Stmt { kind, span });

        if_stmt
            .or(simple)
            .then_ignore(just(Token::Semicolon).repeated())
            .boxed()
    })
}

fn binary(lhs: Expr, (op, rhs): (BinaryOp, Expr)) -> Expr {
    let span = lhs.span.start..rhs.span.end;
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

pub(crate) fn expr_parser() -> impl Parser<Token, Expr, Error = Simple<Token>> + Clone {
    recursive(|expr| {
        let val = select! {
            Token::Int(text) => ExprKind::Literal(Literal::Int(text)),
            Token::Float(text) => ExprKind::Literal(Literal::Float(text)),
            Token::String(text) => ExprKind::Literal(Literal::String(text)),
            Token::True => ExprKind::Literal(Literal::Bool(true)),
            Token::False => ExprKind::Literal(Literal::Bool(false)),
            Token::Identifier(name) => ExprKind::Identifier(name),
        }
        .map_with_span(Expr::new);

        // Parentheses make no node of their own; the inner node takes their span
        let parenthesized = expr
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map_with_span(|inner: Expr, span: Span| Expr { span, ..inner });

        let atom = val.or(parenthesized);

        #[derive(Clone)]
        enum Postfix {
            Call(Vec<Expr>),
            Index(Expr),
        }

        let call_args = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(Postfix::Call);

        let index = expr
            .clone()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(Postfix::Index);

        let postfix = atom
            .then(
                call_args
                    .or(index)
                    .map_with_span(|op, span: Span| (op, span))
                    .repeated(),
            )
            .foldl(|target: Expr, (op, span): (Postfix, Span)| {
                let span = target.span.start..span.end;
                let kind = match op {
                    Postfix::Call(args) => ExprKind::Call {
                        func: Box::new(target),
                        args,
                    },
                    Postfix::Index(index) => ExprKind::Index {
                        target: Box::new(target),
                        index: Box::new(index),
                    },
                };
                Expr::new(kind, span)
            })
            .boxed();

        // Prefix operators (-x, !x), applied right to left
        let unary = just(Token::Minus)
            .to(UnaryOp::Negate)
            .or(just(Token::Not).to(UnaryOp::Not))
            .map_with_span(|op, span: Span| (op, span))
            .repeated()
            .then(postfix)
            .foldr(|(op, span): (UnaryOp, Span), operand: Expr| {
                let span = span.start..operand.span.end;
                Expr::new(
                    ExprKind::Unary {
                        op,
                        expr: Box::new(operand),
                    },
                    span,
                )
            })
            .boxed();

        let product = unary
            .clone()
            .then(
                just(Token::Star)
                    .to(BinaryOp::Mul)
                    .or(just(Token::Slash).to(BinaryOp::Div))
                    .or(just(Token::Percent).to(BinaryOp::Mod))
                    .then(unary)
                    .repeated(),
            )
            .foldl(binary)
            .boxed();

        let sum = product
            .clone()
            .then(
                just(Token::Plus)
                    .to(BinaryOp::Add)
                    .or(just(Token::Minus).to(BinaryOp::Sub))
                    .then(product)
                    .repeated(),
            )
            .foldl(binary)
            .boxed();

        // Comparisons are non-associative: `a < b < c` leaves a dangling `<`
        let comparison = sum
            .clone()
            .then(
                choice((
                    just(Token::DoubleEq).to(BinaryOp::Eq),
                    just(Token::NotEq).to(BinaryOp::NotEq),
                    just(Token::Gt).to(BinaryOp::Gt),
                    just(Token::Lt).to(BinaryOp::Lt),
                    just(Token::GtEq).to(BinaryOp::GtEq),
                    just(Token::LtEq).to(BinaryOp::LtEq),
                ))
                .then(sum)
                .or_not(),
            )
            .map(|(lhs, rest)| match rest {
                Some(rest) => binary(lhs, rest),
                None => lhs,
            })
            .boxed();

        let logic_and = comparison
            .clone()
            .then(
                just(Token::And)
                    .to(BinaryOp::LogicalAnd)
                    .then(comparison)
                    .repeated(),
            )
            .foldl(binary)
            .boxed();

        let logic_or = logic_and
            .clone()
            .then(
                just(Token::Or)
                    .to(BinaryOp::LogicalOr)
                    .then(logic_and)
                    .repeated(),
            )
            .foldl(binary);

        logic_or.boxed()
    })
}
