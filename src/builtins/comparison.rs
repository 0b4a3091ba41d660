//! Comparison builtins: ordering over numerics, structural equality over
//! any two values

use super::{expect_arity, type_mismatch, NativeOp};
use crate::error::Result;
use crate::runtime::Value;

/// `< > <= >=`: two numeric operands, compared after promotion
pub fn ordering(op: NativeOp, args: Vec<Value>) -> Result<Value> {
    expect_arity(op.name(), &args, 2)?;

    let (lhs, rhs) = match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => (*a as f64, *b as f64),
        (Value::Int(a), Value::Dec(b)) => (*a as f64, *b),
        (Value::Dec(a), Value::Int(b)) => (*a, *b as f64),
        (Value::Dec(a), Value::Dec(b)) => (*a, *b),
        (a, b) => {
            let offending = if a.is_numeric() { b } else { a };
            return Err(type_mismatch(op.name(), "Integer or Decimal", offending));
        }
    };

    let result = match op {
        NativeOp::Less => lhs < rhs,
        NativeOp::Greater => lhs > rhs,
        NativeOp::LessEq => lhs <= rhs,
        NativeOp::GreaterEq => lhs >= rhs,
        _ => unreachable!("dispatch routes only ordering ops here"),
    };

    Ok(Value::Bool(result))
}

/// `==` / `!=`: structural equality over any two values. Mismatched types
/// are simply unequal, never an error.
pub fn equality(op: NativeOp, args: Vec<Value>) -> Result<Value> {
    expect_arity(op.name(), &args, 2)?;

    let equal = args[0] == args[1];
    Ok(Value::Bool(match op {
        NativeOp::Eq => equal,
        NativeOp::NotEq => !equal,
        _ => unreachable!("dispatch routes only equality ops here"),
    }))
}
