//! Binding forms: `def`, `=`, the lambda literal `\`, and `fun`

use super::{expect_arity, type_mismatch};
use crate::error::{Error, Result};
use crate::runtime::{Environment, Value};

/// Validates a Q-expression of symbols and returns the names
fn symbol_names(name: &str, value: Value) -> Result<Vec<String>> {
    match value {
        Value::Qexpr(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Sym(s) => Ok(s),
                other => Err(type_mismatch(name, "Symbol", &other)),
            })
            .collect(),
        other => Err(type_mismatch(name, "Q-Expression", &other)),
    }
}

/// Shared implementation of `def` (global frame) and `=` (current frame)
fn bind(env: &Environment, args: Vec<Value>, name: &str, global: bool) -> Result<Value> {
    if args.is_empty() {
        return Err(Error::ArityMismatch {
            name: name.to_string(),
            given: 0,
            expected: 2,
        });
    }

    let mut args = args.into_iter();
    let symbols = symbol_names(name, args.next().expect("checked non-empty"))?;

    // Symbols bound to a Native function in the root frame are protected;
    // anything else - including fun-defined globals - may be rebound.
    for symbol in &symbols {
        if env.is_global_native(symbol) {
            return Err(Error::Redefinition {
                name: symbol.clone(),
            });
        }
    }

    let values: Vec<Value> = args.collect();
    if symbols.len() != values.len() {
        return Err(Error::ArityMismatch {
            name: name.to_string(),
            given: values.len(),
            expected: symbols.len(),
        });
    }

    for (symbol, value) in symbols.into_iter().zip(values) {
        if global {
            env.define_global(symbol, value);
        } else {
            env.put(symbol, value);
        }
    }

    Ok(Value::unit())
}

/// `def`: binds symbols in the global frame
pub fn def(env: &Environment, args: Vec<Value>) -> Result<Value> {
    bind(env, args, "def", true)
}

/// `=`: binds symbols in the current frame
pub fn put(env: &Environment, args: Vec<Value>) -> Result<Value> {
    bind(env, args, "=", false)
}

/// `\`: constructs a closure from a formals Q-expression and a body
/// Q-expression
pub fn lambda(args: Vec<Value>) -> Result<Value> {
    expect_arity("\\", &args, 2)?;

    let mut args = args.into_iter();
    let formals = symbol_names("\\", args.next().expect("arity checked"))?;

    let body = args.next().expect("arity checked");
    if !matches!(body, Value::Qexpr(_)) {
        return Err(type_mismatch("\\", "Q-Expression", &body));
    }

    Ok(Value::lambda(formals, body))
}

/// `fun`: named-function sugar. `(fun {name args...} {body})` extracts the
/// name from the header and desugars to `def` of a constructed closure.
pub fn fun(env: &Environment, args: Vec<Value>) -> Result<Value> {
    expect_arity("fun", &args, 2)?;

    let mut args = args.into_iter();
    let header = args.next().expect("arity checked");
    let body = args.next().expect("arity checked");

    let mut header = match header {
        Value::Qexpr(items) => items,
        other => return Err(type_mismatch("fun", "Q-Expression", &other)),
    };
    if header.is_empty() {
        return Err(Error::EmptySequence {
            name: "fun".to_string(),
        });
    }

    let name = header.remove(0);
    let closure = lambda(vec![Value::Qexpr(header), body])?;

    def(env, vec![Value::Qexpr(vec![name]), closure])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{register_all, NativeOp};
    use crate::runtime::Function;

    fn global_env() -> Environment {
        let env = Environment::new();
        register_all(&env);
        env
    }

    fn sym(s: &str) -> Value {
        Value::Sym(s.to_string())
    }

    #[test]
    fn test_def_binds_globally() {
        let global = global_env();
        let local = Environment::new();
        local.set_parent(global.clone());

        let result = def(
            &local,
            vec![Value::Qexpr(vec![sym("x")]), Value::Int(1)],
        )
        .unwrap();
        assert_eq!(result, Value::unit());
        assert_eq!(global.get("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_put_binds_locally() {
        let global = global_env();
        let local = Environment::new();
        local.set_parent(global.clone());

        put(&local, vec![Value::Qexpr(vec![sym("x")]), Value::Int(1)]).unwrap();
        assert_eq!(local.get("x").unwrap(), Value::Int(1));
        assert!(global.get("x").is_err());
    }

    #[test]
    fn test_multiple_symbols_bind_pairwise() {
        let env = global_env();
        def(
            &env,
            vec![
                Value::Qexpr(vec![sym("a"), sym("b")]),
                Value::Int(1),
                Value::Int(2),
            ],
        )
        .unwrap();
        assert_eq!(env.get("a").unwrap(), Value::Int(1));
        assert_eq!(env.get("b").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_count_mismatch_errors() {
        let env = global_env();
        let result = def(
            &env,
            vec![Value::Qexpr(vec![sym("a"), sym("b")]), Value::Int(1)],
        );
        assert!(matches!(result.unwrap_err(), Error::ArityMismatch { .. }));
    }

    #[test]
    fn test_builtin_redefinition_rejected() {
        let env = global_env();
        let result = def(&env, vec![Value::Qexpr(vec![sym("+")]), Value::Int(5)]);
        assert_eq!(
            result.unwrap_err(),
            Error::Redefinition {
                name: "+".to_string()
            }
        );
        // The builtin is untouched
        assert_eq!(env.get("+").unwrap(), Value::native(NativeOp::Add));
    }

    #[test]
    fn test_local_shadow_of_builtin_is_rejected_by_root_guard() {
        // The guard looks only at the root frame, but it looks there even
        // for `=`; a local `=` of a builtin name is still refused.
        let global = global_env();
        let local = Environment::new();
        local.set_parent(global);

        let result = put(&local, vec![Value::Qexpr(vec![sym("head")]), Value::Int(1)]);
        assert!(matches!(result.unwrap_err(), Error::Redefinition { .. }));
    }

    #[test]
    fn test_fun_defined_global_can_be_redefined() {
        let env = global_env();
        fun(
            &env,
            vec![
                Value::Qexpr(vec![sym("twice"), sym("x")]),
                Value::Qexpr(vec![sym("+"), sym("x"), sym("x")]),
            ],
        )
        .unwrap();

        // Not a Native binding, so the guard does not protect it
        def(&env, vec![Value::Qexpr(vec![sym("twice")]), Value::Int(0)]).unwrap();
        assert_eq!(env.get("twice").unwrap(), Value::Int(0));
    }

    #[test]
    fn test_lambda_constructs_closure() {
        let result = lambda(vec![
            Value::Qexpr(vec![sym("x")]),
            Value::Qexpr(vec![sym("x")]),
        ])
        .unwrap();
        match result {
            Value::Fun(Function::Lambda(l)) => {
                assert_eq!(l.formals, vec!["x".to_string()]);
            }
            other => panic!("expected a closure, got {}", other),
        }
    }

    #[test]
    fn test_lambda_rejects_non_symbol_formals() {
        let result = lambda(vec![
            Value::Qexpr(vec![Value::Int(1)]),
            Value::Qexpr(vec![]),
        ]);
        assert!(matches!(result.unwrap_err(), Error::TypeMismatch { .. }));
    }
}
