// Rule registry and the traversal that drives it
//
// Rules are indexed by the node kinds they ask for. `run` walks the tree once
// and hands every expression to the rules registered for its kind.

use crate::diagnostic::Diagnostic;
use crate::error::{VetError, VetResult};
use crate::rule::{NodeKind, Pass, Rule};
use crate::rules;
use crate::types::TypeTable;
use log::debug;
use parser::ast::{Expr, ExprKind, Program, Stmt, StmtKind};
use std::collections::HashMap;

#[derive(Default)]
pub struct Registry {
    rules: Vec<&'static dyn Rule>,
    by_kind: HashMap<NodeKind, Vec<&'static dyn Rule>>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for rule in rules::all() {
            registry.register(rule);
        }
        registry
    }

    /// A registry holding only the named built-in rules
    pub fn only<S: AsRef<str>>(names: &[S]) -> VetResult<Self> {
        let available = rules::all();
        let mut registry = Self::new();

        for name in names {
            let name = name.as_ref().trim();
            let rule = available
                .iter()
                .find(|rule| rule.name() == name)
                .ok_or_else(|| VetError::UnknownCheck(name.to_string()))?;

            if registry.get(name).is_none() {
                registry.register(*rule);
            }
        }

        Ok(registry)
    }

    pub fn register(&mut self, rule: &'static dyn Rule) {
        for kind in rule.node_kinds() {
            self.by_kind.entry(*kind).or_default().push(rule);
        }
        self.rules.push(rule);
    }

    pub fn get(&self, name: &str) -> Option<&'static dyn Rule> {
        self.rules.iter().copied().find(|rule| rule.name() == name)
    }

    pub fn rules(&self) -> &[&'static dyn Rule] {
        &self.rules
    }

    /// Run every registered rule over `program`.
    ///
    /// Diagnostics come back ordered by where they start in the source.
    pub fn run(&self, program: &Program, types: &TypeTable) -> Vec<Diagnostic> {
        let mut walker = Walker {
            registry: self,
            types,
            diagnostics: Vec::new(),
            visited: 0,
        };

        for stmt in &program.statements {
            walker.visit_stmt(stmt);
        }

        debug!(
            "visited {} expressions with {} rules, {} diagnostics",
            walker.visited,
            self.rules.len(),
            walker.diagnostics.len()
        );

        let mut diagnostics = walker.diagnostics;
        diagnostics.sort_by_key(|d| d.span.start);
        diagnostics
    }
}

struct Walker<'r> {
    registry: &'r Registry,
    types: &'r TypeTable,
    diagnostics: Vec<Diagnostic>,
    visited: usize,
}

impl Walker<'_> {
    fn visit_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VariableDecl { value, .. } => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            StmtKind::ShortDecl { value, .. } => self.visit_expr(value),
            StmtKind::TypeDecl { .. } => {}
            StmtKind::Assignment { target, value } => {
                self.visit_expr(target);
                self.visit_expr(value);
            }
            StmtKind::FunctionDef { body, .. } | StmtKind::Block(body) => self.visit_stmts(body),
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                self.visit_expr(condition);
                self.visit_stmts(then_block);
                if let Some(else_block) = else_block {
                    self.visit_stmt(else_block);
                }
            }
            StmtKind::For { condition, body } => {
                if let Some(condition) = condition {
                    self.visit_expr(condition);
                }
                self.visit_stmts(body);
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            StmtKind::Expr(expr) => self.visit_expr(expr),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.visited += 1;

        let registry = self.registry;
        if let Some(rules) = registry.by_kind.get(&NodeKind::of(expr)) {
            for rule in rules {
                let mut pass = Pass::new(rule.name(), self.types, &mut self.diagnostics);
                rule.check(expr, &mut pass);
            }
        }

        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Identifier(_) => {}
            ExprKind::Unary { expr, .. } => self.visit_expr(expr),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
            }
            ExprKind::Call { func, args } => {
                self.visit_expr(func);
                for arg in args {
                    self.visit_expr(arg);
                }
            }
            ExprKind::Index { target, index } => {
                self.visit_expr(target);
                self.visit_expr(index);
            }
        }
    }
}
