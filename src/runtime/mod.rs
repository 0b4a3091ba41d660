//! Runtime for braq: values, environments, and the evaluator

mod environment;
mod evaluator;
mod value;

pub use environment::Environment;
pub use evaluator::{call, eval, Interpreter, PRELUDE, VARIADIC_MARKER};
pub use value::{Function, Lambda, Value};
