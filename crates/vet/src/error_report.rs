// Diagnostic reporting with Ariadne
//
// Findings are warnings labelled at the offending expression; type errors
// are shown as advice, since vetting carried on past them.

use crate::diagnostic::Diagnostic;
use crate::error::TypeError;
use ariadne::{Color, Label, Report, ReportKind, Source};
use parser::char_span;
use std::io;

/// Print one rule finding as an Ariadne report on stdout
pub fn report_diagnostic(filename: &str, source: &str, diagnostic: &Diagnostic) -> io::Result<()> {
    let span = char_span(source, &diagnostic.span);

    Report::build(ReportKind::Warning, filename, span.start)
        .with_code(diagnostic.check)
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((filename, span))
                .with_message(format!("reported by {}", diagnostic.check))
                .with_color(Color::Yellow),
        )
        .finish()
        .print((filename, Source::from(source)))
}

/// Report multiple findings
pub fn report_diagnostics(
    filename: &str,
    source: &str,
    diagnostics: &[Diagnostic],
) -> io::Result<()> {
    for diagnostic in diagnostics {
        report_diagnostic(filename, source, diagnostic)?;
    }
    Ok(())
}

/// Print a type error as an Ariadne report on stderr
pub fn report_type_error(filename: &str, source: &str, error: &TypeError) -> io::Result<()> {
    let span = char_span(source, error.span());

    Report::build(ReportKind::Advice, filename, span.start)
        .with_code(error.code())
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span))
                .with_message("type information is incomplete here")
                .with_color(Color::Blue),
        )
        .finish()
        .eprint((filename, Source::from(source)))
}
