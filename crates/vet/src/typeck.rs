// Type checker
//
// Resolves a type for every expression node. Problems are recorded as
// `TypeError`s and the offending node gets `Type::Invalid`; checking always
// runs to the end so rules still see every node that did resolve.

use crate::error::TypeError;
use crate::types::{BasicKind, Type, TypeTable};
use log::debug;
use parser::ast::{
    BinaryOp, Expr, ExprKind, Literal, Program, Span, Stmt, StmtKind, TypeExpr, TypeExprKind,
    UnaryOp,
};
use std::collections::HashMap;

/// Result of type checking one program
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    pub types: TypeTable,
    pub errors: Vec<TypeError>,
}

pub fn check_program(program: &Program) -> TypeInfo {
    let mut checker = TypeChecker::new();
    checker.check_program(program);

    debug!(
        "type checked {} expressions, {} errors",
        checker.types.len(),
        checker.errors.len()
    );

    TypeInfo {
        types: checker.types,
        errors: checker.errors,
    }
}

#[derive(Debug, Clone)]
enum Entity {
    Var(Type),
    Func(Type),
    TypeName(Type),
}

const PREDECLARED: &[&str] = &[
    "bool", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32",
    "uint64", "uintptr", "float32", "float64", "string", "byte", "rune",
];

struct TypeChecker {
    scopes: Vec<HashMap<String, Entity>>,
    types: TypeTable,
    errors: Vec<TypeError>,
    // Result type of each enclosing function, innermost last
    results: Vec<Option<Type>>,
}

impl TypeChecker {
    fn new() -> Self {
        let universe: HashMap<String, Entity> = PREDECLARED
            .iter()
            .filter_map(|name| {
                BasicKind::from_name(name)
                    .map(|kind| (name.to_string(), Entity::TypeName(Type::Basic(kind))))
            })
            .collect();

        TypeChecker {
            scopes: vec![universe, HashMap::new()],
            types: TypeTable::new(),
            errors: Vec::new(),
            results: Vec::new(),
        }
    }

    // ==================== SCOPES ====================

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &str, entity: Entity, span: &Span) {
        // `_` never binds
        if name == "_" {
            return;
        }

        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        if scope.contains_key(name) {
            self.errors.push(TypeError::Redeclared {
                name: name.to_string(),
                span: span.clone(),
            });
            return;
        }

        scope.insert(name.to_string(), entity);
    }

    fn lookup(&self, name: &str) -> Option<&Entity> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn resolve_type(&mut self, ty: &TypeExpr) -> Type {
        match &ty.kind {
            TypeExprKind::Named(name) => match self.lookup(name) {
                Some(Entity::TypeName(t)) => t.clone(),
                _ => {
                    self.errors.push(TypeError::UnknownType {
                        name: name.clone(),
                        span: ty.span.clone(),
                    });
                    Type::Invalid
                }
            },
            TypeExprKind::Slice(elem) => Type::Slice(Box::new(self.resolve_type(elem))),
        }
    }

    // ==================== STATEMENTS ====================

    fn check_program(&mut self, program: &Program) {
        // Top-level declarations first, so uses may come before them
        for stmt in &program.statements {
            match &stmt.kind {
                StmtKind::TypeDecl { name, ty } => self.declare_type(name, ty, &stmt.span),
                StmtKind::FunctionDef {
                    name,
                    params,
                    return_type,
                    ..
                } => {
                    let sig = self.signature(params.iter().map(|p| &p.ty), return_type.as_ref());
                    self.declare(name, Entity::Func(sig), &stmt.span);
                }
                _ => {}
            }
        }

        for stmt in &program.statements {
            match &stmt.kind {
                StmtKind::TypeDecl { .. } => {}
                StmtKind::FunctionDef { .. } => self.check_function(stmt),
                _ => self.check_stmt(stmt),
            }
        }
    }

    fn declare_type(&mut self, name: &str, ty: &TypeExpr, span: &Span) {
        let underlying = self.resolve_type(ty).underlying().clone();
        let named = Type::Named {
            name: name.to_string(),
            underlying: Box::new(underlying),
        };
        self.declare(name, Entity::TypeName(named), span);
    }

    fn signature<'p>(
        &mut self,
        params: impl Iterator<Item = &'p TypeExpr>,
        return_type: Option<&TypeExpr>,
    ) -> Type {
        let params = params.map(|ty| self.resolve_type(ty)).collect();
        let result = return_type.map(|ty| Box::new(self.resolve_type(ty)));
        Type::Func { params, result }
    }

    fn check_function(&mut self, stmt: &Stmt) {
        let StmtKind::FunctionDef {
            params,
            return_type,
            body,
            ..
        } = &stmt.kind
        else {
            return;
        };

        self.push_scope();
        for param in params {
            let ty = self.resolve_type(&param.ty);
            self.declare(&param.name, Entity::Var(ty), &param.span);
        }

        let result = return_type.as_ref().map(|ty| self.resolve_type(ty));
        self.results.push(result);
        // Parameters and body share one scope
        for stmt in body {
            self.check_stmt(stmt);
        }
        self.results.pop();
        self.pop_scope();
    }

    fn check_block(&mut self, stmts: &[Stmt]) {
        self.push_scope();
        for stmt in stmts {
            self.check_stmt(stmt);
        }
        self.pop_scope();
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VariableDecl { name, ty, value } => {
                let declared = ty.as_ref().map(|ty| self.resolve_type(ty));
                let value_ty = value.as_ref().map(|value| (self.check_expr(value), value));

                let var_ty = match (declared, value_ty) {
                    (Some(declared), Some((found, value))) => {
                        self.expect_assignable(&declared, &found, "variable declaration", &value.span);
                        declared
                    }
                    (Some(declared), None) => declared,
                    (None, Some((found, _))) => found.default_type(),
                    (None, None) => Type::Invalid,
                };
                self.declare(name, Entity::Var(var_ty), &stmt.span);
            }

            StmtKind::ShortDecl { name, value } => {
                let ty = self.check_expr(value).default_type();
                self.declare(name, Entity::Var(ty), &stmt.span);
            }

            StmtKind::TypeDecl { name, ty } => self.declare_type(name, ty, &stmt.span),

            StmtKind::Assignment { target, value } => {
                let target_ty = self.check_expr(target);
                let value_ty = self.check_expr(value);
                self.expect_assignable(&target_ty, &value_ty, "assignment", &value.span);
            }

            StmtKind::FunctionDef {
                name,
                params,
                return_type,
                ..
            } => {
                // Nested functions are visible from their declaration on
                let sig = self.signature(params.iter().map(|p| &p.ty), return_type.as_ref());
                self.declare(name, Entity::Func(sig), &stmt.span);
                self.check_function(stmt);
            }

            StmtKind::Block(stmts) => self.check_block(stmts),

            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                self.check_condition(condition);
                self.check_block(then_block);
                if let Some(else_block) = else_block {
                    self.check_stmt(else_block);
                }
            }

            StmtKind::For { condition, body } => {
                if let Some(condition) = condition {
                    self.check_condition(condition);
                }
                self.check_block(body);
            }

            StmtKind::Return(value) => {
                let found = value.as_ref().map(|value| self.check_expr(value));
                let expected = self.results.last().cloned().flatten();

                match (expected, found, value) {
                    (Some(expected), Some(found), Some(value)) => {
                        self.expect_assignable(&expected, &found, "return statement", &value.span);
                    }
                    (Some(expected), None, _) => self.errors.push(TypeError::Mismatch {
                        expected: expected.to_string(),
                        found: "no value".to_string(),
                        context: "return statement".to_string(),
                        span: stmt.span.clone(),
                    }),
                    (None, Some(found), Some(value)) => self.errors.push(TypeError::Mismatch {
                        expected: "no value".to_string(),
                        found: found.to_string(),
                        context: "return statement".to_string(),
                        span: value.span.clone(),
                    }),
                    _ => {}
                }
            }

            StmtKind::Expr(expr) => {
                self.check_expr(expr);
            }
        }
    }

    fn check_condition(&mut self, condition: &Expr) {
        let ty = self.check_expr(condition);
        if !ty.is_invalid() && !ty.basic_kind().is_some_and(BasicKind::is_boolean) {
            self.errors.push(TypeError::Mismatch {
                expected: "bool".to_string(),
                found: ty.to_string(),
                context: "condition".to_string(),
                span: condition.span.clone(),
            });
        }
    }

    // ==================== EXPRESSIONS ====================

    fn check_expr(&mut self, expr: &Expr) -> Type {
        let ty = self.infer_expr(expr);
        self.types.insert(expr.id, ty.clone());
        ty
    }

    fn infer_expr(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Literal(literal) => Type::Basic(match literal {
                Literal::Int(_) => BasicKind::UntypedInt,
                Literal::Float(_) => BasicKind::UntypedFloat,
                Literal::String(_) => BasicKind::UntypedString,
                Literal::Bool(_) => BasicKind::UntypedBool,
            }),

            ExprKind::Identifier(name) => match self.lookup(name) {
                Some(Entity::Var(ty)) | Some(Entity::Func(ty)) => ty.clone(),
                Some(Entity::TypeName(_)) => {
                    self.errors.push(TypeError::NotAnExpression {
                        name: name.clone(),
                        span: expr.span.clone(),
                    });
                    Type::Invalid
                }
                None => {
                    self.errors.push(TypeError::UndefinedName {
                        name: name.clone(),
                        span: expr.span.clone(),
                    });
                    Type::Invalid
                }
            },

            ExprKind::Unary { op, expr: operand } => {
                let ty = self.check_expr(operand);
                if ty.is_invalid() {
                    return Type::Invalid;
                }

                let (symbol, ok) = match op {
                    UnaryOp::Negate => ("-", ty.basic_kind().is_some_and(BasicKind::is_numeric)),
                    UnaryOp::Not => ("!", ty.basic_kind().is_some_and(BasicKind::is_boolean)),
                };
                if !ok {
                    self.errors.push(TypeError::InvalidOperand {
                        op: symbol.to_string(),
                        found: ty.to_string(),
                        span: expr.span.clone(),
                    });
                    return Type::Invalid;
                }

                match op {
                    UnaryOp::Negate => ty,
                    UnaryOp::Not => Type::Basic(BasicKind::UntypedBool),
                }
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_ty = self.check_expr(lhs);
                let rhs_ty = self.check_expr(rhs);
                self.binary_type(*op, &lhs_ty, &rhs_ty, &expr.span)
            }

            ExprKind::Call { func, args } => self.call_type(func, args, &expr.span),

            ExprKind::Index { target, index } => {
                let target_ty = self.check_expr(target);
                let index_ty = self.check_expr(index);

                if !index_ty.is_invalid() && !index_ty.basic_kind().is_some_and(BasicKind::is_integer)
                {
                    self.errors.push(TypeError::Mismatch {
                        expected: "integer".to_string(),
                        found: index_ty.to_string(),
                        context: "index".to_string(),
                        span: index.span.clone(),
                    });
                }

                match target_ty.underlying() {
                    Type::Invalid => Type::Invalid,
                    Type::Slice(elem) => (**elem).clone(),
                    Type::Basic(kind) if kind.is_string() => Type::Basic(BasicKind::Uint8),
                    _ => {
                        self.errors.push(TypeError::NotIndexable {
                            found: target_ty.to_string(),
                            span: target.span.clone(),
                        });
                        Type::Invalid
                    }
                }
            }
        }
    }

    fn binary_type(&mut self, op: BinaryOp, lhs: &Type, rhs: &Type, span: &Span) -> Type {
        if lhs.is_invalid() || rhs.is_invalid() {
            // Comparisons still produce a boolean; keep conditions quiet
            return if op.is_comparison() || op.is_logical() {
                Type::Basic(BasicKind::UntypedBool)
            } else {
                Type::Invalid
            };
        }

        if op.is_logical() {
            for ty in [lhs, rhs] {
                if !ty.basic_kind().is_some_and(BasicKind::is_boolean) {
                    self.errors.push(TypeError::InvalidOperand {
                        op: op.symbol().to_string(),
                        found: ty.to_string(),
                        span: span.clone(),
                    });
                }
            }
            return Type::Basic(BasicKind::UntypedBool);
        }

        let Some(operand) = self.unify(lhs, rhs, span) else {
            return if op.is_comparison() {
                Type::Basic(BasicKind::UntypedBool)
            } else {
                Type::Invalid
            };
        };

        if op.is_comparison() {
            return Type::Basic(BasicKind::UntypedBool);
        }

        let kind = operand.basic_kind();
        let ok = match op {
            BinaryOp::Add => kind.is_some_and(|k| k.is_numeric() || k.is_string()),
            BinaryOp::Mod => kind.is_some_and(BasicKind::is_integer),
            _ => kind.is_some_and(BasicKind::is_numeric),
        };
        if !ok {
            self.errors.push(TypeError::InvalidOperand {
                op: op.symbol().to_string(),
                found: operand.to_string(),
                span: span.clone(),
            });
            return Type::Invalid;
        }

        operand
    }

    /// The common type of two operands, or None (with an error recorded)
    fn unify(&mut self, lhs: &Type, rhs: &Type, span: &Span) -> Option<Type> {
        if lhs == rhs {
            return Some(lhs.clone());
        }

        match (lhs.is_untyped(), rhs.is_untyped()) {
            (true, true) => {
                let (Some(a), Some(b)) = (lhs.basic_kind(), rhs.basic_kind()) else {
                    return None;
                };
                if a.is_numeric() && b.is_numeric() {
                    // untyped int and untyped float make an untyped float
                    return Some(Type::Basic(BasicKind::UntypedFloat));
                }
            }
            (true, false) if assignable(rhs, lhs) => return Some(rhs.clone()),
            (false, true) if assignable(lhs, rhs) => return Some(lhs.clone()),
            _ => {}
        }

        self.errors.push(TypeError::Mismatch {
            expected: lhs.to_string(),
            found: rhs.to_string(),
            context: "binary expression".to_string(),
            span: span.clone(),
        });
        None
    }

    fn call_type(&mut self, func: &Expr, args: &[Expr], span: &Span) -> Type {
        // Conversion: T(x)
        if let ExprKind::Identifier(name) = &func.kind {
            if let Some(Entity::TypeName(target)) = self.lookup(name) {
                let target = target.clone();
                self.types.insert(func.id, target.clone());

                let arg_types: Vec<Type> = args.iter().map(|arg| self.check_expr(arg)).collect();
                if arg_types.len() != 1 {
                    self.errors.push(TypeError::WrongArgCount {
                        expected: 1,
                        found: arg_types.len(),
                        span: span.clone(),
                    });
                } else if !convertible(&arg_types[0], &target) {
                    self.errors.push(TypeError::InvalidConversion {
                        from: arg_types[0].to_string(),
                        to: target.to_string(),
                        span: span.clone(),
                    });
                }
                return target;
            }
        }

        let func_ty = self.check_expr(func);
        let arg_types: Vec<Type> = args.iter().map(|arg| self.check_expr(arg)).collect();

        match func_ty {
            Type::Invalid => Type::Invalid,
            Type::Func { params, result } => {
                if params.len() != arg_types.len() {
                    self.errors.push(TypeError::WrongArgCount {
                        expected: params.len(),
                        found: arg_types.len(),
                        span: span.clone(),
                    });
                } else {
                    for ((param, found), arg) in params.iter().zip(&arg_types).zip(args) {
                        self.expect_assignable(param, found, "argument", &arg.span);
                    }
                }
                // A call without a result has no usable type
                result.map_or(Type::Invalid, |result| *result)
            }
            other => {
                self.errors.push(TypeError::NotCallable {
                    found: other.to_string(),
                    span: func.span.clone(),
                });
                Type::Invalid
            }
        }
    }

    fn expect_assignable(&mut self, target: &Type, value: &Type, context: &str, span: &Span) {
        if !assignable(target, value) {
            self.errors.push(TypeError::Mismatch {
                expected: target.to_string(),
                found: value.to_string(),
                context: context.to_string(),
                span: span.clone(),
            });
        }
    }
}

/// Can a value of type `value` be stored in a `target`?
fn assignable(target: &Type, value: &Type) -> bool {
    if target.is_invalid() || value.is_invalid() || target == value {
        return true;
    }

    let Type::Basic(untyped) = value else {
        return false;
    };
    if !untyped.is_untyped() {
        return false;
    }

    let Some(kind) = target.basic_kind() else {
        return false;
    };
    match untyped {
        BasicKind::UntypedInt => kind.is_numeric(),
        BasicKind::UntypedFloat => kind.is_float(),
        BasicKind::UntypedString => kind.is_string(),
        BasicKind::UntypedBool => kind.is_boolean(),
        _ => false,
    }
}

fn convertible(from: &Type, to: &Type) -> bool {
    if assignable(to, from) || from.underlying() == to.underlying() {
        return true;
    }

    match (from.basic_kind(), to.basic_kind()) {
        (Some(a), Some(b)) => {
            (a.is_numeric() && b.is_numeric()) || (a.is_string() && b.is_string())
        }
        _ => false,
    }
}
