//! Logical connectives and the conditional form

use super::{expect_arity, type_mismatch, NativeOp};
use crate::error::Result;
use crate::runtime::{eval, Environment, Value};

/// `&&` / `||`: two Boolean operands
///
/// Both operands are already evaluated by the time a native runs, so these
/// do not short-circuit; `if` is the only form that does.
pub fn connective(op: NativeOp, args: Vec<Value>) -> Result<Value> {
    expect_arity(op.name(), &args, 2)?;

    let (lhs, rhs) = match (&args[0], &args[1]) {
        (Value::Bool(a), Value::Bool(b)) => (*a, *b),
        (Value::Bool(_), other) | (other, _) => {
            return Err(type_mismatch(op.name(), "Boolean", other))
        }
    };

    Ok(Value::Bool(match op {
        NativeOp::And => lhs && rhs,
        NativeOp::Or => lhs || rhs,
        _ => unreachable!("dispatch routes only connectives here"),
    }))
}

/// `not`: one Boolean operand
pub fn not(args: Vec<Value>) -> Result<Value> {
    expect_arity("not", &args, 1)?;

    match &args[0] {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(type_mismatch("not", "Boolean", other)),
    }
}

/// `if`: Boolean condition and two Q-expression branches. The selected
/// branch is converted to an S-expression and evaluated; the other branch
/// is discarded unevaluated.
pub fn branch(env: &Environment, args: Vec<Value>) -> Result<Value> {
    expect_arity("if", &args, 3)?;

    let mut args = args.into_iter();
    let cond = args.next().expect("arity checked");
    let then_branch = args.next().expect("arity checked");
    let else_branch = args.next().expect("arity checked");

    let cond = match cond {
        Value::Bool(b) => b,
        other => return Err(type_mismatch("if", "Boolean", &other)),
    };

    // Both branches must be quoted, even the one about to be discarded
    for operand in [&then_branch, &else_branch] {
        if !matches!(operand, Value::Qexpr(_)) {
            return Err(type_mismatch("if", "Q-Expression", operand));
        }
    }

    let chosen = if cond { then_branch } else { else_branch };
    match chosen {
        Value::Qexpr(items) => eval(env, Value::Sexpr(items)),
        _ => unreachable!("both branches validated above"),
    }
}
