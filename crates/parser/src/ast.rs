// crates/parser/src/ast.rs

use std::fmt;

pub use lexer::Span;

/// Identity of an expression node inside one `Program`.
///
/// Ids are handed out in source order by `Program::assign_ids`, so the
/// type checker and the vet rules can refer to a node without holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ExprId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal as written (`42`, `0xff`, `1_000`)
    Int(String),
    Float(String),
    String(String),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::Gt
                | BinaryOp::LtEq
                | BinaryOp::GtEq
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::LogicalAnd | BinaryOp::LogicalOr)
    }

    /// Binding strength, higher binds tighter
    fn precedence(self) -> u8 {
        match self {
            BinaryOp::LogicalOr => 1,
            BinaryOp::LogicalAnd => 2,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 5,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub id: ExprId,
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),

    Identifier(String),

    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },

    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    // Also used for conversions: uint32(x)
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },

    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    /// Build a node with a placeholder id; `Program::assign_ids` fixes it up.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            id: ExprId::default(),
            kind,
            span,
        }
    }

    fn precedence(&self) -> u8 {
        match &self.kind {
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Unary { .. } => 6,
            _ => 7,
        }
    }

    fn assign_ids(&mut self, next: &mut u32) {
        self.id = ExprId(*next);
        *next += 1;

        match &mut self.kind {
            ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
            ExprKind::Unary { expr, .. } => expr.assign_ids(next),
            ExprKind::Binary { lhs, rhs, .. } => {
                lhs.assign_ids(next);
                rhs.assign_ids(next);
            }
            ExprKind::Call { func, args } => {
                func.assign_ids(next);
                for arg in args {
                    arg.assign_ids(next);
                }
            }
            ExprKind::Index { target, index } => {
                target.assign_ids(next);
                index.assign_ids(next);
            }
        }
    }
}

// Prints the expression back as source text, adding parentheses only where
// precedence requires them.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(Literal::Int(text)) | ExprKind::Literal(Literal::Float(text)) => {
                write!(f, "{}", text)
            }
            ExprKind::Literal(Literal::String(text)) => write!(f, "\"{}\"", text),
            ExprKind::Literal(Literal::Bool(value)) => write!(f, "{}", value),
            ExprKind::Identifier(name) => write!(f, "{}", name),
            ExprKind::Unary { op, expr } => {
                let symbol = match op {
                    UnaryOp::Negate => "-",
                    UnaryOp::Not => "!",
                };
                if expr.precedence() < 6 {
                    write!(f, "{}({})", symbol, expr)
                } else {
                    write!(f, "{}{}", symbol, expr)
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                // Comparisons do not chain, so a comparison operand needs parens
                if lhs.precedence() < prec || (op.is_comparison() && lhs.precedence() == prec) {
                    write!(f, "({})", lhs)?;
                } else {
                    write!(f, "{}", lhs)?;
                }
                write!(f, " {} ", op.symbol())?;
                if rhs.precedence() <= prec {
                    write!(f, "({})", rhs)
                } else {
                    write!(f, "{}", rhs)
                }
            }
            ExprKind::Call { func, args } => {
                write!(f, "{}(", func)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            ExprKind::Index { target, index } => write!(f, "{}[{}]", target, index),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExprKind {
    Named(String),
    Slice(Box<TypeExpr>),
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeExprKind::Named(name) => write!(f, "{}", name),
            TypeExprKind::Slice(elem) => write!(f, "[]{}", elem),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `var x T`, `var x T = e` or `var x = e`
    VariableDecl {
        name: String,
        ty: Option<TypeExpr>,
        value: Option<Expr>,
    },

    /// `x := e`
    ShortDecl {
        name: String,
        value: Expr,
    },

    /// `type Name T`
    TypeDecl {
        name: String,
        ty: TypeExpr,
    },

    Assignment {
        target: Expr,
        value: Expr,
    },

    FunctionDef {
        name: String,
        params: Vec<Param>,
        return_type: Option<TypeExpr>,
        body: Vec<Stmt>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_block: Vec<Stmt>,
        // Either a Block or a nested If (else if)
        else_block: Option<Box<Stmt>>,
    },

    For {
        condition: Option<Expr>,
        body: Vec<Stmt>,
    },

    Return(Option<Expr>),

    Expr(Expr),
}

impl Stmt {
    fn assign_ids(&mut self, next: &mut u32) {
        match &mut self.kind {
            StmtKind::VariableDecl { value, .. } => {
                if let Some(value) = value {
                    value.assign_ids(next);
                }
            }
            StmtKind::ShortDecl { value, .. } => value.assign_ids(next),
            StmtKind::TypeDecl { .. } => {}
            StmtKind::Assignment { target, value } => {
                target.assign_ids(next);
                value.assign_ids(next);
            }
            StmtKind::FunctionDef { body, .. } | StmtKind::Block(body) => {
                for stmt in body {
                    stmt.assign_ids(next);
                }
            }
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                condition.assign_ids(next);
                for stmt in then_block {
                    stmt.assign_ids(next);
                }
                if let Some(else_block) = else_block {
                    else_block.assign_ids(next);
                }
            }
            StmtKind::For { condition, body } => {
                if let Some(condition) = condition {
                    condition.assign_ids(next);
                }
                for stmt in body {
                    stmt.assign_ids(next);
                }
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    value.assign_ids(next);
                }
            }
            StmtKind::Expr(expr) => expr.assign_ids(next),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    /// Number every expression node in source order, starting at 0.
    /// Returns how many ids were handed out.
    pub fn assign_ids(&mut self) -> u32 {
        let mut next = 0;
        for stmt in &mut self.statements {
            stmt.assign_ids(&mut next);
        }
        next
    }
}
