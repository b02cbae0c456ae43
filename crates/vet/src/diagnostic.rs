use parser::ast::Span;

/// A finding reported by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the rule that produced it
    pub check: &'static str,
    pub span: Span,
    pub message: String,
}

/// 1-based line and column (in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(check: &'static str, span: Span, message: impl Into<String>) -> Self {
        Diagnostic {
            check,
            span,
            message: message.into(),
        }
    }

    pub fn position(&self, source: &str) -> Position {
        position_of(source, self.span.start)
    }
}

pub fn position_of(source: &str, offset: usize) -> Position {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);

    Position {
        line: before.matches('\n').count() + 1,
        column: before[line_start..].chars().count() + 1,
    }
}
