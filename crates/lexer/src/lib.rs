pub mod token;

use logos::Logos;
use std::ops::Range;
use token::Token;

/// Byte range of a token in the source text
pub type Span = Range<usize>;

/// Tokenize a source string keeping byte spans.
///
/// Returns the recognized tokens and, separately, the spans of every
/// character sequence the lexer could not match.
pub fn lex_spanned(source: &str) -> (Vec<(Token, Span)>, Vec<Span>) {
    let mut tokens = Vec::new();
    let mut invalid = Vec::new();

    for (result, span) in Token::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => invalid.push(span),
        }
    }

    (tokens, invalid)
}

#[cfg(test)]
mod tests;
