// Error handling for cmpvet
//
// `TypeError` collects what the type checker could not make sense of; the
// checker records it and keeps going. `VetError` is what stops the driver
// from checking a file at all.

use parser::ParseFailure;
use std::fmt;
use std::io;

pub use parser::ast::Span;

/// Type checking error types
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// Identifier not found in any enclosing scope
    UndefinedName { name: String, span: Span },

    /// Type name not found (or names something that is not a type)
    UnknownType { name: String, span: Span },

    /// A type name used where a value is expected
    NotAnExpression { name: String, span: Span },

    /// Same name declared twice in one scope
    Redeclared { name: String, span: Span },

    /// Type mismatch or incompatibility
    Mismatch {
        expected: String,
        found: String,
        context: String,
        span: Span,
    },

    /// Operator applied to an operand of the wrong type
    InvalidOperand {
        op: String,
        found: String,
        span: Span,
    },

    NotCallable { found: String, span: Span },

    WrongArgCount {
        expected: usize,
        found: usize,
        span: Span,
    },

    NotIndexable { found: String, span: Span },

    InvalidConversion { from: String, to: String, span: Span },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::UndefinedName { name, .. } => write!(f, "undefined: {}", name),
            TypeError::UnknownType { name, .. } => write!(f, "{} is not a type", name),
            TypeError::NotAnExpression { name, .. } => {
                write!(f, "{} (type) is not an expression", name)
            }
            TypeError::Redeclared { name, .. } => {
                write!(f, "{} redeclared in this block", name)
            }
            TypeError::Mismatch {
                expected,
                found,
                context,
                ..
            } => write!(
                f,
                "cannot use {} as {} in {}",
                found, expected, context
            ),
            TypeError::InvalidOperand { op, found, .. } => {
                write!(f, "operator {} not defined on {}", op, found)
            }
            TypeError::NotCallable { found, .. } => {
                write!(f, "cannot call non-function of type {}", found)
            }
            TypeError::WrongArgCount {
                expected, found, ..
            } => write!(
                f,
                "wrong number of arguments: expected {}, found {}",
                expected, found
            ),
            TypeError::NotIndexable { found, .. } => write!(f, "cannot index {}", found),
            TypeError::InvalidConversion { from, to, .. } => {
                write!(f, "cannot convert {} to {}", from, to)
            }
        }
    }
}

impl std::error::Error for TypeError {}

impl TypeError {
    pub fn span(&self) -> &Span {
        match self {
            TypeError::UndefinedName { span, .. }
            | TypeError::UnknownType { span, .. }
            | TypeError::NotAnExpression { span, .. }
            | TypeError::Redeclared { span, .. }
            | TypeError::Mismatch { span, .. }
            | TypeError::InvalidOperand { span, .. }
            | TypeError::NotCallable { span, .. }
            | TypeError::WrongArgCount { span, .. }
            | TypeError::NotIndexable { span, .. }
            | TypeError::InvalidConversion { span, .. } => span,
        }
    }

    /// Stable code shown in reports
    pub fn code(&self) -> &'static str {
        match self {
            TypeError::UndefinedName { .. } => "T001",
            TypeError::UnknownType { .. } => "T002",
            TypeError::NotAnExpression { .. } => "T003",
            TypeError::Redeclared { .. } => "T004",
            TypeError::Mismatch { .. } => "T005",
            TypeError::InvalidOperand { .. } => "T006",
            TypeError::NotCallable { .. } => "T007",
            TypeError::WrongArgCount { .. } => "T008",
            TypeError::NotIndexable { .. } => "T009",
            TypeError::InvalidConversion { .. } => "T010",
        }
    }
}

/// Errors that keep a file (or the whole run) from being vetted
#[derive(Debug)]
pub enum VetError {
    /// `--checks` named a rule that is not registered
    UnknownCheck(String),

    Io { path: String, source: io::Error },

    Parse { path: String, failure: ParseFailure },
}

impl fmt::Display for VetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VetError::UnknownCheck(name) => write!(f, "unknown check '{}'", name),
            VetError::Io { path, source } => write!(f, "{}: {}", path, source),
            VetError::Parse { path, failure } => write!(f, "{}: {}", path, failure),
        }
    }
}

impl std::error::Error for VetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VetError::UnknownCheck(_) => None,
            VetError::Io { source, .. } => Some(source),
            VetError::Parse { failure, .. } => Some(failure),
        }
    }
}

impl VetError {
    /// Get the exit code for this error type
    /// Diagnostics use 1; anything that prevented checking uses 2
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Convenient Result type for vet operations
pub type VetResult<T> = Result<T, VetError>;
