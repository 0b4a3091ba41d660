//! Sequence builtins: list construction and surgery
//!
//! Strings behave as sequences of single-character units for `head` and
//! `tail`. `eval` is the bridge back from quoted data to running code.

use super::{expect_arity, type_mismatch};
use crate::error::{Error, Result};
use crate::runtime::{eval, Environment, Value};

/// `list`: packages the arguments as a Q-expression
pub fn list(args: Vec<Value>) -> Result<Value> {
    Ok(Value::Qexpr(args))
}

/// `head`: `{a b c}` -> `{a}`, `"abc"` -> `"a"`
pub fn head(args: Vec<Value>) -> Result<Value> {
    expect_arity("head", &args, 1)?;

    match args.into_iter().next().expect("arity checked") {
        Value::Qexpr(items) => {
            let mut items = items;
            if items.is_empty() {
                return Err(Error::EmptySequence {
                    name: "head".to_string(),
                });
            }
            items.truncate(1);
            Ok(Value::Qexpr(items))
        }
        Value::Str(s) => match s.chars().next() {
            Some(c) => Ok(Value::Str(c.to_string())),
            None => Err(Error::EmptySequence {
                name: "head".to_string(),
            }),
        },
        other => Err(type_mismatch("head", "Q-Expression or String", &other)),
    }
}

/// `tail`: `{a b c}` -> `{b c}`, `"abc"` -> `"bc"`
pub fn tail(args: Vec<Value>) -> Result<Value> {
    expect_arity("tail", &args, 1)?;

    match args.into_iter().next().expect("arity checked") {
        Value::Qexpr(items) => {
            if items.is_empty() {
                return Err(Error::EmptySequence {
                    name: "tail".to_string(),
                });
            }
            Ok(Value::Qexpr(items.into_iter().skip(1).collect()))
        }
        Value::Str(s) => {
            let mut chars = s.chars();
            if chars.next().is_none() {
                return Err(Error::EmptySequence {
                    name: "tail".to_string(),
                });
            }
            Ok(Value::Str(chars.collect()))
        }
        other => Err(type_mismatch("tail", "Q-Expression or String", &other)),
    }
}

/// `eval`: converts a Q-expression to an S-expression and evaluates it
pub fn eval_quoted(env: &Environment, args: Vec<Value>) -> Result<Value> {
    expect_arity("eval", &args, 1)?;

    match args.into_iter().next().expect("arity checked") {
        Value::Qexpr(items) => eval(env, Value::Sexpr(items)),
        other => Err(type_mismatch("eval", "Q-Expression", &other)),
    }
}

/// `join`: concatenates operands that are uniformly String or uniformly
/// Q-expression; mixing the two is an error
pub fn join(args: Vec<Value>) -> Result<Value> {
    if args.is_empty() {
        return Err(Error::ArityMismatch {
            name: "join".to_string(),
            given: 0,
            expected: 1,
        });
    }

    let mut saw_str = false;
    let mut saw_qexpr = false;
    for arg in &args {
        match arg {
            Value::Str(_) => saw_str = true,
            Value::Qexpr(_) => saw_qexpr = true,
            other => return Err(type_mismatch("join", "Q-Expression or String", other)),
        }
        if saw_str && saw_qexpr {
            return Err(Error::MixedJoin);
        }
    }

    if saw_str {
        let mut joined = String::new();
        for arg in args {
            match arg {
                Value::Str(s) => joined.push_str(&s),
                _ => unreachable!("validated above"),
            }
        }
        Ok(Value::Str(joined))
    } else {
        let mut joined = Vec::new();
        for arg in args {
            match arg {
                Value::Qexpr(items) => joined.extend(items),
                _ => unreachable!("validated above"),
            }
        }
        Ok(Value::Qexpr(joined))
    }
}

/// `cons`: prepends a value to a Q-expression
pub fn cons(args: Vec<Value>) -> Result<Value> {
    expect_arity("cons", &args, 2)?;

    let mut args = args.into_iter();
    let value = args.next().expect("arity checked");
    match args.next().expect("arity checked") {
        Value::Qexpr(items) => {
            let mut joined = Vec::with_capacity(items.len() + 1);
            joined.push(value);
            joined.extend(items);
            Ok(Value::Qexpr(joined))
        }
        other => Err(type_mismatch("cons", "Q-Expression", &other)),
    }
}

/// `init`: everything but the final element of a Q-expression
pub fn init(args: Vec<Value>) -> Result<Value> {
    expect_arity("init", &args, 1)?;

    match args.into_iter().next().expect("arity checked") {
        Value::Qexpr(mut items) => {
            if items.pop().is_none() {
                return Err(Error::EmptySequence {
                    name: "init".to_string(),
                });
            }
            Ok(Value::Qexpr(items))
        }
        other => Err(type_mismatch("init", "Q-Expression", &other)),
    }
}

/// `len`: element count of a Q-expression
pub fn len(args: Vec<Value>) -> Result<Value> {
    expect_arity("len", &args, 1)?;

    match &args[0] {
        Value::Qexpr(items) => Ok(Value::Int(items.len() as i64)),
        other => Err(type_mismatch("len", "Q-Expression", other)),
    }
}

/// `read`: lifts a String into a Q-expression containing one Symbol
pub fn read(args: Vec<Value>) -> Result<Value> {
    expect_arity("read", &args, 1)?;

    match args.into_iter().next().expect("arity checked") {
        Value::Str(s) => Ok(Value::Qexpr(vec![Value::Sym(s)])),
        other => Err(type_mismatch("read", "String", &other)),
    }
}
