// Error reporting with Ariadne
//
// Parse failures carry both lexer problems (characters no token matches)
// and chumsky errors, and are rendered as Ariadne reports on stderr.

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::error::Simple;
use lexer::token::Token;
use lexer::Span;
use std::fmt;
use std::io;

/// Type alias for Chumsky parser errors
pub type ParseError = Simple<Token>;

/// Everything that went wrong while turning one source file into a `Program`
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// Spans of characters the lexer could not match
    pub invalid_chars: Vec<Span>,
    pub errors: Vec<ParseError>,
}

impl ParseFailure {
    pub fn count(&self) -> usize {
        self.invalid_chars.len() + self.errors.len()
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count() {
            1 => write!(f, "1 syntax error"),
            n => write!(f, "{} syntax errors", n),
        }
    }
}

impl std::error::Error for ParseFailure {}

/// Converts a byte span into the character span Ariadne labels expect.
///
/// Offsets past the end of `source` (the end-of-input span) stay past it.
pub fn char_span(source: &str, span: &Span) -> Span {
    let offset = |byte: usize| {
        let clamped = byte.min(source.len());
        let chars = source
            .get(..clamped)
            .map_or(clamped, |prefix| prefix.chars().count());
        chars + (byte - clamped)
    };
    offset(span.start)..offset(span.end)
}

/// Converts a parse failure to Ariadne reports printed on stderr
pub fn report_errors(filename: &str, source: &str, failure: &ParseFailure) -> io::Result<()> {
    for span in &failure.invalid_chars {
        let text = source.get(span.clone()).unwrap_or("?");
        let span = char_span(source, span);

        Report::build(ReportKind::Error, filename, span.start)
            .with_code("E002")
            .with_message("Invalid character")
            .with_label(
                Label::new((filename, span))
                    .with_message(format!("'{}' is not valid here", text))
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))?;
    }

    for error in &failure.errors {
        let span = char_span(source, &error.span());
        let msg = format!("{}", error);

        let report = Report::build(ReportKind::Error, filename, span.start)
            .with_code("E001")
            .with_message("Parse Error")
            .with_label(
                Label::new((filename, span))
                    .with_message(msg)
                    .with_color(Color::Red),
            );

        // Add expected tokens if available (limit to 5 to avoid overwhelming output)
        let report = if error.expected().len() > 0 {
            let mut expected: Vec<String> = error.expected().map(format_expected).collect();
            expected.sort();

            let help_msg = if expected.len() > 5 {
                format!("Expected one of: {}, ...", expected[..5].join(", "))
            } else {
                format!("Expected: {}", expected.join(", "))
            };

            report.with_help(help_msg)
        } else {
            report
        };

        report.finish().eprint((filename, Source::from(source)))?;
    }

    Ok(())
}

/// Format expected token for human-readable output
fn format_expected(token: &Option<Token>) -> String {
    match token {
        Some(Token::Identifier(_)) => "identifier".to_string(),
        Some(Token::Int(_)) => "integer".to_string(),
        Some(Token::Float(_)) => "float".to_string(),
        Some(Token::String(_)) => "string".to_string(),
        Some(t @ (Token::Var
        | Token::Func
        | Token::Type
        | Token::If
        | Token::Else
        | Token::For
        | Token::Return)) => format!("keyword '{}'", t),
        Some(t) => format!("'{}'", t),
        None => "end of input".to_string(),
    }
}
