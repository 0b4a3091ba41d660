//! Miscellaneous builtins: printing, user errors, introspection, the exit
//! sentinel, and file loading

use std::fs;

use tracing::debug;

use super::expect_arity;
use crate::error::{Error, Result};
use crate::lexer::Scanner;
use crate::parser::Parser;
use crate::runtime::{eval, Environment, Value};

/// Sentinel symbol returned by `exit`; the front end stops its input loop
/// when it sees this value (or the bare `exit` function) at top level.
pub const EXIT_SENTINEL: &str = "exit";

/// `env`: the calling environment's current-frame bindings as a
/// Q-expression of `{name value}` pairs
pub fn env_snapshot(env: &Environment, _args: Vec<Value>) -> Result<Value> {
    Ok(env.snapshot())
}

/// `exit`: returns the sentinel symbol. Performs no process control; the
/// front end decides what to do with it.
pub fn exit(_args: Vec<Value>) -> Result<Value> {
    Ok(Value::Sym(EXIT_SENTINEL.to_string()))
}

/// `print`: writes space-joined representations and a newline to stdout,
/// returning the unit value
pub fn print(args: Vec<Value>) -> Result<Value> {
    let line = args
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(Value::unit())
}

/// `error`: constructs a user-raised error from a String argument
pub fn error(args: Vec<Value>) -> Result<Value> {
    expect_arity("error", &args, 1)?;

    match args.into_iter().next().expect("arity checked") {
        Value::Str(message) => Err(Error::Generic(message)),
        other => Err(super::type_mismatch("error", "String", &other)),
    }
}

/// `load`: parses a source file and evaluates each top-level form in
/// order. An error in one form is printed and the loop continues with the
/// next, mirroring the script front end. Returns the unit value.
pub fn load(env: &Environment, args: Vec<Value>) -> Result<Value> {
    expect_arity("load", &args, 1)?;

    let path = match args.into_iter().next().expect("arity checked") {
        Value::Str(path) => path,
        other => return Err(super::type_mismatch("load", "String", &other)),
    };

    debug!(path = %path, "load file");

    let source = fs::read_to_string(&path)
        .map_err(|e| Error::Generic(format!("Could not load library '{}': {}", path, e)))?;

    run_source(env, &path, &source)
}

/// Shared by `load` and the embedded-prelude path: evaluate every form,
/// print errors, keep going.
pub(crate) fn run_source(env: &Environment, origin: &str, source: &str) -> Result<Value> {
    let mut scanner = Scanner::new(source);
    let program = scanner
        .scan_tokens()
        .and_then(|tokens| Parser::new(tokens).parse())
        .map_err(|e| Error::Generic(format!("Could not load library '{}': {}", origin, e)))?;

    for form in program.forms {
        if let Err(e) = eval(env, Value::from(form)) {
            println!("Error: {}", e);
        }
    }

    Ok(Value::unit())
}
