//! Arithmetic builtins: `+ - * / % min max pow`
//!
//! All operands must be numeric. When Integer and Decimal operands are
//! mixed, every Integer is promoted to Decimal before the operation; there
//! is no demotion. `-` with a single operand is negation.

use super::{expect_arity, type_mismatch, NativeOp};
use crate::error::{Error, Result};
use crate::runtime::Value;

/// Operand list after numeric-type promotion
enum Operands {
    Ints(Vec<i64>),
    Decs(Vec<f64>),
}

/// Validates that every operand is numeric and promotes to a common type
fn promote(name: &str, args: &[Value]) -> Result<Operands> {
    let mut saw_dec = false;
    for arg in args {
        match arg {
            Value::Int(_) => {}
            Value::Dec(_) => saw_dec = true,
            other => return Err(type_mismatch(name, "Integer or Decimal", other)),
        }
    }

    if saw_dec {
        Ok(Operands::Decs(
            args.iter()
                .map(|v| match v {
                    Value::Int(n) => *n as f64,
                    Value::Dec(d) => *d,
                    _ => unreachable!("validated above"),
                })
                .collect(),
        ))
    } else {
        Ok(Operands::Ints(
            args.iter()
                .map(|v| match v {
                    Value::Int(n) => *n,
                    _ => unreachable!("validated above"),
                })
                .collect(),
        ))
    }
}

/// Left fold implementing `+ - * / % min max`
pub fn fold(op: NativeOp, args: Vec<Value>) -> Result<Value> {
    if args.is_empty() {
        return Err(Error::ArityMismatch {
            name: op.name().to_string(),
            given: 0,
            expected: 1,
        });
    }

    match promote(op.name(), &args)? {
        Operands::Ints(operands) => fold_ints(op, operands),
        Operands::Decs(operands) => fold_decs(op, operands),
    }
}

fn fold_ints(op: NativeOp, operands: Vec<i64>) -> Result<Value> {
    let mut iter = operands.into_iter();
    let mut acc = iter.next().expect("arity checked by caller");

    // Unary negation
    if op == NativeOp::Sub && iter.len() == 0 {
        return Ok(Value::Int(-acc));
    }

    for operand in iter {
        acc = match op {
            NativeOp::Add => acc.wrapping_add(operand),
            NativeOp::Sub => acc.wrapping_sub(operand),
            NativeOp::Mul => acc.wrapping_mul(operand),
            NativeOp::Div => {
                if operand == 0 {
                    return Err(Error::DivisionByZero);
                }
                acc.wrapping_div(operand)
            }
            NativeOp::Mod => {
                if operand == 0 {
                    return Err(Error::DivisionByZero);
                }
                acc.wrapping_rem(operand)
            }
            NativeOp::Min => acc.min(operand),
            NativeOp::Max => acc.max(operand),
            _ => unreachable!("dispatch routes only arithmetic ops here"),
        };
    }

    Ok(Value::Int(acc))
}

fn fold_decs(op: NativeOp, operands: Vec<f64>) -> Result<Value> {
    let mut iter = operands.into_iter();
    let mut acc = iter.next().expect("arity checked by caller");

    if op == NativeOp::Sub && iter.len() == 0 {
        return Ok(Value::Dec(-acc));
    }

    for operand in iter {
        acc = match op {
            NativeOp::Add => acc + operand,
            NativeOp::Sub => acc - operand,
            NativeOp::Mul => acc * operand,
            NativeOp::Div => {
                if operand == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                acc / operand
            }
            NativeOp::Mod => return Err(Error::DecimalModulo),
            NativeOp::Min => acc.min(operand),
            NativeOp::Max => acc.max(operand),
            _ => unreachable!("dispatch routes only arithmetic ops here"),
        };
    }

    Ok(Value::Dec(acc))
}

/// `pow`: two numeric operands, result is always Decimal
pub fn pow(args: Vec<Value>) -> Result<Value> {
    expect_arity("pow", &args, 2)?;

    let exponent = as_decimal("pow", &args[1])?;
    let base = as_decimal("pow", &args[0])?;

    Ok(Value::Dec(base.powf(exponent)))
}

fn as_decimal(name: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Dec(d) => Ok(*d),
        other => Err(type_mismatch(name, "Integer or Decimal", other)),
    }
}
