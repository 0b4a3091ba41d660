use tracing::{debug, trace};

use crate::builtins;
use crate::error::{Error, Result};
use crate::lexer::Scanner;
use crate::parser::{Parser, Program};
use crate::runtime::value::{Function, Lambda, Value};
use crate::runtime::Environment;

/// Reserved formal-parameter name introducing a rest-parameter
pub const VARIADIC_MARKER: &str = "&";

/// Bootstrap library written in braq itself, loaded through the same
/// evaluation entry point as user input.
pub const PRELUDE: &str = include_str!("../prelude.bq");

/// Evaluates a value in the given environment
///
/// Symbols are looked up (errors propagate), evaluable S-expressions are
/// reduced, everything else - including Q-expressions - is self-evaluating
/// and returned unchanged.
pub fn eval(env: &Environment, value: Value) -> Result<Value> {
    match value {
        Value::Sym(name) => env.get(&name),
        Value::Sexpr(items) => eval_sexpr(env, items),
        other => Ok(other),
    }
}

/// Reduces an evaluable S-expression
fn eval_sexpr(env: &Environment, items: Vec<Value>) -> Result<Value> {
    // Every element is evaluated before any error surfaces, so effects run
    // in source order and the earliest error wins.
    let results: Vec<Result<Value>> = items.into_iter().map(|item| eval(env, item)).collect();

    let mut values = Vec::with_capacity(results.len());
    for result in results {
        values.push(result?);
    }

    // Empty expression is the unit value; a singleton reduces to its element
    if values.is_empty() {
        return Ok(Value::Sexpr(values));
    }
    if values.len() == 1 {
        return Ok(values.remove(0));
    }

    let head = values.remove(0);
    match head {
        Value::Fun(func) => call(env, func, values),
        other => Err(Error::NotCallable {
            got: other.type_name().to_string(),
        }),
    }
}

/// Applies a function value to a positional argument list
///
/// Natives dispatch directly; closures bind arguments one formal at a time,
/// producing a partially-applied closure when arguments run out first.
pub fn call(env: &Environment, func: Function, args: Vec<Value>) -> Result<Value> {
    match func {
        Function::Native(op) => {
            trace!(op = op.name(), argc = args.len(), "native call");
            builtins::dispatch(env, op, args)
        }
        Function::Lambda(lambda) => call_lambda(env, *lambda, args),
    }
}

fn call_lambda(env: &Environment, mut lambda: Lambda, args: Vec<Value>) -> Result<Value> {
    let given = args.len();
    let total = lambda.formals.len();
    let mut args = std::collections::VecDeque::from(args);

    while !args.is_empty() {
        if lambda.formals.is_empty() {
            return Err(Error::ArityMismatch {
                name: "lambda".to_string(),
                given,
                expected: total,
            });
        }

        let formal = lambda.formals.remove(0);

        // `&` binds the single following formal to all remaining arguments
        if formal == VARIADIC_MARKER {
            if lambda.formals.len() != 1 {
                return Err(Error::MalformedVariadic);
            }
            let rest = lambda.formals.remove(0);
            lambda.env.put(rest, Value::Qexpr(Vec::from(args)));
            break;
        }

        let value = args.pop_front().expect("loop guard ensures an argument");
        lambda.env.put(formal, value);
    }

    // A call that stopped short of the marker still binds the rest-formal,
    // to an empty list.
    if lambda.formals.first().map(String::as_str) == Some(VARIADIC_MARKER) {
        if lambda.formals.len() != 2 {
            return Err(Error::MalformedVariadic);
        }
        lambda.formals.remove(0);
        let rest = lambda.formals.remove(0);
        lambda.env.put(rest, Value::Qexpr(Vec::new()));
    }

    if lambda.formals.is_empty() {
        // Saturated: evaluate the body as an S-expression inside the
        // closure's frame, reparented onto the calling environment.
        lambda.env.set_parent(env.clone());
        match lambda.body {
            Value::Qexpr(items) => eval(&lambda.env, Value::Sexpr(items)),
            other => Err(Error::TypeMismatch {
                name: "lambda".to_string(),
                expected: "Q-Expression".to_string(),
                got: other.type_name().to_string(),
            }),
        }
    } else {
        // Partial application: the remaining formals stay unbound
        Ok(Value::Fun(Function::Lambda(Box::new(lambda))))
    }
}

/// Interpreter session: the global environment plus the builtin library
///
/// Construction registers every builtin before any user input is evaluated.
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    /// Creates an interpreter with a fresh global environment and the
    /// builtin library registered into it
    pub fn new() -> Self {
        let env = Environment::new();
        builtins::register_all(&env);
        Interpreter { env }
    }

    /// The global environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Evaluates every top-level form of a parsed program in order,
    /// returning the last result. Stops at the first error.
    pub fn execute(&mut self, program: &Program) -> Result<Value> {
        let mut last = Value::unit();
        for form in &program.forms {
            last = eval(&self.env, Value::from(form.clone()))?;
        }
        Ok(last)
    }

    /// Scans, parses, and executes a source string
    pub fn run(&mut self, source: &str) -> Result<Value> {
        debug!(bytes = source.len(), "run source");
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens()?;
        let program = Parser::new(tokens).parse()?;
        self.execute(&program)
    }

    /// Loads a source file the way the `load` builtin does: each top-level
    /// form is evaluated in order, errors are printed and skipped
    pub fn load_file(&mut self, path: &str) -> Result<Value> {
        builtins::dispatch(
            &self.env,
            builtins::NativeOp::Load,
            vec![Value::Str(path.to_string())],
        )
    }

    /// Loads the embedded prelude through the normal evaluation entry point
    pub fn load_prelude(&mut self) -> Result<()> {
        builtins::run_source(&self.env, "prelude", PRELUDE).map(|_| ())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
