//! # braq - a small LISP dialect with Q-expressions
//!
//! braq is an interpreter for a dynamically-typed, Lisp-family expression
//! language. S-expressions `( ... )` are applications; Q-expressions
//! `{ ... }` are inert data that `eval` can turn back into running code.
//! Functions are first-class closures with curried partial application and
//! `&` rest-parameters.
//!
//! ## Quick Start
//!
//! ```rust
//! use braq::{Interpreter, Value};
//!
//! # fn main() -> braq::Result<()> {
//! let mut interp = Interpreter::new();
//!
//! assert_eq!(interp.run("(+ 1 2 3)")?, Value::Int(6));
//!
//! // Mixed numeric operands promote to Decimal
//! assert_eq!(interp.run("(+ 1 2.0)")?, Value::Dec(3.0));
//!
//! // Q-expressions are data until eval'd
//! assert_eq!(interp.run("(eval (tail {1 + 2 3}))")?, Value::Int(5));
//! # Ok(())
//! # }
//! ```
//!
//! ### Closures and currying
//!
//! ```rust
//! use braq::{Interpreter, Value};
//!
//! # fn main() -> braq::Result<()> {
//! let mut interp = Interpreter::new();
//! interp.run(r"(def {add3} (\ {x y z} {+ x y z}))")?;
//!
//! // Supplying fewer arguments than formals yields a new closure
//! interp.run("(def {add1+2} (add3 1 2))")?;
//! assert_eq!(interp.run("(add1+2 39)")?, Value::Int(42));
//! # Ok(())
//! # }
//! ```
//!
//! ### Errors are values of the host `Result`
//!
//! ```rust
//! use braq::Interpreter;
//!
//! let mut interp = Interpreter::new();
//! let err = interp.run("(/ 5 0)").unwrap_err();
//! assert_eq!(err.to_string(), "Division by zero");
//! ```
//!
//! ## Architecture
//!
//! The classic interpreter pipeline:
//!
//! ```text
//! Source -> Scanner -> Tokens -> Parser -> Forms -> eval -> Value
//! ```
//!
//! ### Main components
//!
//! - [`Scanner`] - tokenizes source text
//! - [`Parser`] - parses tokens into the tagged parse tree ([`Form`])
//! - [`Interpreter`] - owns the global [`Environment`] and the builtin
//!   library, and drives [`eval`]
//! - [`Value`] - runtime value representation
//! - [`Environment`] - parent-linked scope chain
//!
//! The builtin library is registered into the global environment when the
//! interpreter is constructed, before any user input is evaluated. Errors
//! are ordinary values of [`enum@Error`]; evaluation never panics on bad
//! input, and the front end prints `Error: <message>` and keeps going.

/// Version of the braq interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builtins;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use builtins::{NativeOp, EXIT_SENTINEL};
pub use error::{Error, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{Form, Parser, Program};
pub use runtime::{call, eval, Environment, Function, Interpreter, Lambda, Value};
