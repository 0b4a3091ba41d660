//! Error types for the braq interpreter

use thiserror::Error;

/// braq interpreter errors
///
/// Every error the language can surface is a value of this enum. Builtins
/// validate their operands eagerly and return one of these in place of a
/// result; nothing in the evaluator panics on bad input. The front end
/// renders an error as `Error: <message>` and keeps reading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Scan/parse errors
    /// Syntax error encountered while scanning or parsing
    ///
    /// **Triggered by:** invalid source text (unterminated string, stray
    /// character outside the symbol charset, unmatched delimiter)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where the error occurred
        line: usize,
        /// Column number where the error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Unexpected end of input during parsing
    #[error("Unexpected end of input")]
    UnexpectedEof,

    // Runtime errors
    /// Reference to a symbol with no binding anywhere on the scope chain
    ///
    /// **Triggered by:** evaluating a symbol before it is defined
    /// **Example:** `x` when `x` was never bound with `def` or `=`
    #[error("Unbound symbol '{name}'")]
    UnboundSymbol {
        /// Symbol name
        name: String,
    },

    /// A function received the wrong number of arguments
    ///
    /// **Example:** a two-formal lambda called with three arguments
    #[error("Function '{name}' passed incorrect number of arguments. Got {given}, expected {expected}")]
    ArityMismatch {
        /// Function name
        name: String,
        /// Number of arguments given
        given: usize,
        /// Number of arguments expected
        expected: usize,
    },

    /// An operand had the wrong type
    ///
    /// **Triggered by:** e.g. `(+ "hello" 5)`, `(if 1 {a} {b})`
    #[error("Function '{name}' passed incorrect type. Got {got}, expected {expected}")]
    TypeMismatch {
        /// Function name
        name: String,
        /// Expected type description
        expected: String,
        /// Actual type received
        got: String,
    },

    /// The head of an evaluated S-expression was not a function
    ///
    /// **Example:** `(1 2 3)` - the first element evaluates to an Integer
    #[error("S-Expression starts with incorrect type. Got {got}, expected Function")]
    NotCallable {
        /// Type of the offending head value
        got: String,
    },

    /// Division or modulo by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Modulo applied to Decimal operands
    #[error("Modulo is an invalid operation on Decimal")]
    DecimalModulo,

    /// Attempt to rebind a builtin name in the global frame
    ///
    /// Only symbols bound to a Native function in the root frame are
    /// protected; local shadows and user-defined globals are not.
    #[error("Invalid attempt to redefine builtin function '{name}'")]
    Redefinition {
        /// The protected builtin name
        name: String,
    },

    /// Variadic formal list is malformed
    ///
    /// **Triggered by:** a formal list where `&` is not followed by exactly
    /// one symbol, e.g. `{x &}` or `{x & y z}`
    #[error("Function format invalid. Symbol '&' not followed by single symbol")]
    MalformedVariadic,

    /// A list operation received an empty sequence
    #[error("Function '{name}' passed an empty sequence")]
    EmptySequence {
        /// Function name
        name: String,
    },

    /// `join` received a mix of String and Q-Expression operands
    #[error("Function 'join' cannot join Q-Expression with String")]
    MixedJoin,

    /// User-raised or otherwise uncategorized error
    ///
    /// **Triggered by:** the `error` builtin, or a failed `load`
    #[error("{0}")]
    Generic(String),
}

/// Result type for braq operations
pub type Result<T> = std::result::Result<T, Error>;
