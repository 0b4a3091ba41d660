use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for braq source text
///
/// Produces the token stream consumed by [`crate::parser::Parser`]. The
/// scanner is a plain character-at-a-time state machine; there is no
/// lookahead beyond one character.
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of the current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
}

/// Characters permitted in a symbol. Operators and the lambda marker `\`
/// are ordinary symbols, so the set is wide.
fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "_+-*/%^\\=<>!&|".contains(c)
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            // Whitespace
            ' ' | '\r' | '\t' => {}
            '\n' => {
                self.line += 1;
                self.column = 1;
            }

            // Comments run to end of line
            ';' => self.skip_line_comment(),

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),

            '"' => self.scan_string()?,

            // A '-' starts a number only when a digit or fraction follows;
            // otherwise it is the subtraction symbol.
            '-' => {
                if self.peek().is_ascii_digit() || (self.peek() == '.' && self.peek_next().is_ascii_digit()) {
                    self.scan_number()?;
                } else {
                    self.scan_symbol();
                }
            }

            '.' => {
                if self.peek().is_ascii_digit() {
                    self.scan_number()?;
                } else {
                    return Err(self.syntax_error("Unexpected character '.'".to_string()));
                }
            }

            c if c.is_ascii_digit() => self.scan_number()?,

            c if is_symbol_char(c) => self.scan_symbol(),

            c => {
                return Err(self.syntax_error(format!("Unexpected character '{}'", c)));
            }
        }

        Ok(())
    }

    /// Scans a number literal. A literal containing `.` becomes a Decimal
    /// token, otherwise an Integer token.
    fn scan_number(&mut self) -> Result<()> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && !self.lexeme().contains('.') {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        if lexeme.contains('.') {
            let value: f64 = lexeme
                .parse()
                .map_err(|_| self.syntax_error(format!("Invalid number '{}'", lexeme)))?;
            self.add_token(TokenKind::Decimal(value));
        } else {
            let value: i64 = lexeme
                .parse()
                .map_err(|_| self.syntax_error(format!("Invalid number '{}'", lexeme)))?;
            self.add_token(TokenKind::Integer(value));
        }

        Ok(())
    }

    /// Scans a string literal, processing escape sequences
    fn scan_string(&mut self) -> Result<()> {
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return Err(self.syntax_error("Unterminated string".to_string()));
            }

            match self.advance() {
                '"' => break,
                '\\' => {
                    if self.is_at_end() {
                        return Err(self.syntax_error("Unterminated string".to_string()));
                    }
                    let escaped = self.advance();
                    match escaped {
                        'n' => value.push('\n'),
                        'r' => value.push('\r'),
                        't' => value.push('\t'),
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        '\'' => value.push('\''),
                        '0' => value.push('\0'),
                        other => {
                            return Err(self.syntax_error(format!(
                                "Unknown escape sequence '\\{}'",
                                other
                            )));
                        }
                    }
                }
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                    value.push('\n');
                }
                c => value.push(c),
            }
        }

        self.add_token(TokenKind::String(value));
        Ok(())
    }

    /// Scans a symbol; `true` and `false` become Boolean tokens
    fn scan_symbol(&mut self) {
        while is_symbol_char(self.peek()) {
            self.advance();
        }

        let lexeme = self.lexeme();
        let kind = match lexeme.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Symbol(lexeme),
        };
        self.add_token(kind);
    }

    fn skip_line_comment(&mut self) {
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
    }

    // Low-level cursor helpers

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        let column = self.column.saturating_sub(lexeme.chars().count());
        self.tokens.push(Token::new(kind, lexeme, self.line, column));
    }

    fn syntax_error(&self, message: String) -> Error {
        Error::SyntaxError {
            line: self.line,
            col: self.column,
            message,
        }
    }
}
