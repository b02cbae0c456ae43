use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t\r\n\f]+")] // Ignore spaces, tabs and line breaks automatically
#[logos(skip(r"//[^\n]*", allow_greedy = true))]
pub enum Token {
    // --- Keywords ---
    #[token("var")]
    Var,

    #[token("func")]
    Func,

    #[token("type")]
    Type,

    #[token("if")]
    If,

    #[token("else")]
    Else,

    #[token("for")]
    For,

    #[token("return")]
    Return,

    #[token("true")]
    True,

    #[token("false")]
    False,

    // --- Literals ---

    // Identifiers: variable, function and type names (ex: "count", "uint32")
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Integers keep their source text; the checker decides what it can read.
    // (ex: 42, 1_000, 0xff, 0o17, 0b1010)
    #[regex(r"0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+|[0-9][0-9_]*", |lex| lex.slice().to_string())]
    Int(String),

    // Floats (ex: 3.14, 1.5e3, 2e10)
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().to_string())]
    Float(String),

    // Strings, stored without the surrounding quotes
    #[regex(r#""([^"\\]|\\["\\bnfrt])*""#, |lex| {
        let raw = lex.slice();
        raw[1..raw.len() - 1].to_string()
    })]
    String(String),

    // --- Operators ---
    #[token(":=")]
    ColonEq, // Short declaration (x := 10)

    #[token("=")]
    Eq,

    #[token("==")]
    DoubleEq,

    #[token("!=")]
    NotEq,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token(">=")]
    GtEq,

    #[token("<=")]
    LtEq,

    #[token("&&")]
    And,

    #[token("||")]
    Or,

    #[token("!")]
    Not,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    // --- Delimiters ---
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket, // Slice types and indexing

    #[token("]")]
    RBracket,
}

// Tokens print the way they are written, so parse errors can quote them
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Token::Var => "var",
            Token::Func => "func",
            Token::Type => "type",
            Token::If => "if",
            Token::Else => "else",
            Token::For => "for",
            Token::Return => "return",
            Token::True => "true",
            Token::False => "false",
            Token::Identifier(name) => return write!(f, "{}", name),
            Token::Int(text) | Token::Float(text) => return write!(f, "{}", text),
            Token::String(text) => return write!(f, "\"{}\"", text),
            Token::ColonEq => ":=",
            Token::Eq => "=",
            Token::DoubleEq => "==",
            Token::NotEq => "!=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Gt => ">",
            Token::Lt => "<",
            Token::GtEq => ">=",
            Token::LtEq => "<=",
            Token::And => "&&",
            Token::Or => "||",
            Token::Not => "!",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
        };
        write!(f, "{}", text)
    }
}
