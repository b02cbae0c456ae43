pub mod ast;
pub mod error;
pub mod parser;

use chumsky::{Parser, Stream};

pub use error::{ParseError, ParseFailure, char_span, report_errors};

/// Lex and parse a whole source file.
///
/// Spans in the returned tree are byte offsets into `source`. Any character
/// the lexer rejects makes the whole parse fail, even if the remaining
/// tokens form a valid program.
pub fn parse(source: &str) -> Result<ast::Program, ParseFailure> {
    let (tokens, invalid_chars) = lexer::lex_spanned(source);
    let eoi = source.len()..source.len() + 1;

    match parser::parser().parse(Stream::from_iter(eoi, tokens.into_iter())) {
        Ok(program) if invalid_chars.is_empty() => Ok(program),
        Ok(_) => Err(ParseFailure {
            invalid_chars,
            errors: Vec::new(),
        }),
        Err(errors) => Err(ParseFailure {
            invalid_chars,
            errors,
        }),
    }
}

#[cfg(test)]
mod tests;
