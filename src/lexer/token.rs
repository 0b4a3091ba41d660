use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where the token appears (1-indexed)
    pub line: usize,
    /// Column number where the token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// All possible token types in braq
///
/// The surface syntax is deliberately small: two delimiter pairs, four
/// literal kinds, and symbols. Everything else in the language is a symbol,
/// including the operators and the lambda marker `\`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Integer literal
    Integer(i64),
    /// Decimal (floating-point) literal
    Decimal(f64),
    /// String literal, escapes already processed
    String(String),
    /// Boolean `true` literal
    True,
    /// Boolean `false` literal
    False,

    /// Symbol: any run of `[a-zA-Z0-9_+\-*/%^\\=<>!&|]` that is not a
    /// number or boolean literal
    Symbol(String),

    // S-expression delimiters
    /// `(` starting an evaluable S-expression
    LeftParen,
    /// `)`
    RightParen,
    /// `{` starting a quoted Q-expression
    LeftBrace,
    /// `}`
    RightBrace,

    /// End of input marker
    Eof,
}
