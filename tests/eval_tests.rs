//! Core evaluation tests: self-evaluation, S-expression reduction,
//! closures, and currying

use braq::{eval, Environment, Error, Interpreter, NativeOp, Value};

fn eval_source(source: &str) -> braq::Result<Value> {
    Interpreter::new().run(source)
}

// ====================
// Self-Evaluating Values
// ====================

#[test]
fn test_literals_evaluate_to_themselves() {
    assert_eq!(eval_source("42").unwrap(), Value::Int(42));
    assert_eq!(eval_source("-17").unwrap(), Value::Int(-17));
    assert_eq!(eval_source("2.5").unwrap(), Value::Dec(2.5));
    assert_eq!(eval_source("true").unwrap(), Value::Bool(true));
    assert_eq!(eval_source("false").unwrap(), Value::Bool(false));
    assert_eq!(
        eval_source(r#""hello""#).unwrap(),
        Value::Str("hello".to_string())
    );
}

#[test]
fn test_quoted_sequences_are_inert() {
    assert_eq!(
        eval_source("{+ 1 2}").unwrap(),
        Value::Qexpr(vec![
            Value::Sym("+".to_string()),
            Value::Int(1),
            Value::Int(2),
        ])
    );
    // A division by zero inside a Q-expression never runs
    assert_eq!(
        eval_source("{(/ 1 0)}").unwrap(),
        Value::Qexpr(vec![Value::Sexpr(vec![
            Value::Sym("/".to_string()),
            Value::Int(1),
            Value::Int(0),
        ])])
    );
}

#[test]
fn test_every_self_evaluating_variant_is_fixed_by_eval() {
    let env = Environment::new();
    let values = vec![
        Value::Int(7),
        Value::Dec(0.5),
        Value::Bool(true),
        Value::Str("s".to_string()),
        Value::native(NativeOp::Head),
        Value::lambda(
            vec!["x".to_string()],
            Value::Qexpr(vec![Value::Sym("x".to_string())]),
        ),
        Value::Qexpr(vec![Value::Int(1), Value::Qexpr(vec![])]),
    ];
    for value in values {
        assert_eq!(eval(&env, value.clone()).unwrap(), value);
    }
}

// ====================
// S-Expression Reduction
// ====================

#[test]
fn test_empty_sexpr_is_the_unit_value() {
    assert_eq!(eval_source("()").unwrap(), Value::unit());
}

#[test]
fn test_singleton_reduces_to_its_element() {
    assert_eq!(eval_source("(5)").unwrap(), Value::Int(5));
    assert_eq!(eval_source("((5))").unwrap(), Value::Int(5));
}

#[test]
fn test_symbols_resolve_to_builtins() {
    assert_eq!(eval_source("+").unwrap(), Value::native(NativeOp::Add));
}

#[test]
fn test_non_function_head_errors_with_type_name() {
    assert_eq!(
        eval_source("(1 2 3)").unwrap_err(),
        Error::NotCallable {
            got: "Integer".to_string()
        }
    );
    assert_eq!(
        eval_source(r#"("f" 2)"#).unwrap_err(),
        Error::NotCallable {
            got: "String".to_string()
        }
    );
}

#[test]
fn test_unbound_symbol() {
    assert_eq!(
        eval_source("nowhere").unwrap_err(),
        Error::UnboundSymbol {
            name: "nowhere".to_string()
        }
    );
}

#[test]
fn test_first_error_in_source_order_wins() {
    assert_eq!(
        eval_source("(+ missing (/ 1 0))").unwrap_err(),
        Error::UnboundSymbol {
            name: "missing".to_string()
        }
    );
    assert_eq!(
        eval_source("(+ (/ 1 0) missing)").unwrap_err(),
        Error::DivisionByZero
    );
}

#[test]
fn test_nested_evaluation() {
    assert_eq!(eval_source("(+ (* 2 3) (- 10 4))").unwrap(), Value::Int(12));
}

// ====================
// Closures
// ====================

#[test]
fn test_lambda_application() {
    assert_eq!(
        eval_source(r"((\ {x y} {+ x y}) 2 3)").unwrap(),
        Value::Int(5)
    );
}

#[test]
fn test_formals_shadow_builtin_names_locally() {
    // Parameter binding is not subject to the redefinition guard
    assert_eq!(eval_source(r"((\ {head} {head}) 5)").unwrap(), Value::Int(5));
}

#[test]
fn test_closure_sees_definition_site_bindings_through_parent_chain() {
    let mut interp = Interpreter::new();
    interp.run("(def {base} 100)").unwrap();
    interp.run(r"(def {above-base} (\ {x} {+ base x}))").unwrap();
    assert_eq!(interp.run("(above-base 1)").unwrap(), Value::Int(101));
}

#[test]
fn test_recursion_via_global_self_reference() {
    let mut interp = Interpreter::new();
    interp
        .run("(fun {fib n} {if (< n 2) {n} {+ (fib (- n 1)) (fib (- n 2))}})")
        .unwrap();
    assert_eq!(interp.run("(fib 10)").unwrap(), Value::Int(55));
}

// ====================
// Currying
// ====================

#[test]
fn test_partial_application_returns_closure() {
    let mut interp = Interpreter::new();
    interp.run(r"(def {add2} (\ {x y} {+ x y}))").unwrap();
    let partial = interp.run("(add2 1)").unwrap();
    assert_eq!(partial.type_name(), "Function");
}

#[test]
fn test_partial_then_full_equals_direct_application() {
    let mut interp = Interpreter::new();
    interp.run(r"(def {add2} (\ {x y} {+ x y}))").unwrap();
    let staged = interp.run("((add2 1) 2)").unwrap();
    let direct = interp.run("(add2 1 2)").unwrap();
    assert_eq!(staged, direct);
    assert_eq!(staged, Value::Int(3));
}

#[test]
fn test_currying_one_argument_at_a_time() {
    assert_eq!(
        eval_source(r"((((\ {x y z} {+ x y z}) 1) 2) 3)").unwrap(),
        Value::Int(6)
    );
}

#[test]
fn test_two_formal_closure_with_three_args_is_arity_error() {
    assert_eq!(
        eval_source(r"((\ {x y} {+ x y}) 1 2 3)").unwrap_err(),
        Error::ArityMismatch {
            name: "lambda".to_string(),
            given: 3,
            expected: 2,
        }
    );
}

#[test]
fn test_partial_application_does_not_corrupt_the_original() {
    let mut interp = Interpreter::new();
    interp.run(r"(def {add2} (\ {x y} {+ x y}))").unwrap();
    interp.run("(def {inc} (add2 1))").unwrap();
    // The original closure still wants two arguments
    assert_eq!(interp.run("(add2 10 20)").unwrap(), Value::Int(30));
    assert_eq!(interp.run("(inc 5)").unwrap(), Value::Int(6));
    // And the partial application is reusable
    assert_eq!(interp.run("(inc 6)").unwrap(), Value::Int(7));
}

// ====================
// Function Equality
// ====================

#[test]
fn test_closures_equal_despite_different_environments() {
    // Both partial applications leave formals {x} and body {x} while
    // capturing different bindings; the environments are not compared.
    assert_eq!(
        eval_source(r"(== ((\ {a x} {x}) 1) ((\ {b x} {x}) 2))").unwrap(),
        Value::Bool(true)
    );
    // Differing formal lists do make closures unequal
    assert_eq!(
        eval_source(r"(== (\ {a x} {x}) (\ {b x} {x}))").unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_native_equality_is_operation_identity() {
    assert_eq!(eval_source("(== + add)").unwrap(), Value::Bool(true));
    assert_eq!(eval_source("(== + -)").unwrap(), Value::Bool(false));
    assert_eq!(eval_source("(== head head)").unwrap(), Value::Bool(true));
}
