//! Builtin function library for braq
//!
//! Every native operation is a tag in the closed [`NativeOp`] enum; the
//! language's `Function` values carry the tag, equality compares it, and
//! [`dispatch`] routes a call to the implementing module. The library is
//! registered into the global environment once, before any user input is
//! evaluated. Several operations are registered under more than one name
//! (`+`/`add`, `\`/lambda, ...); aliases share one tag and therefore
//! compare equal.

mod arithmetic;
mod bindings;
mod comparison;
mod io;
mod logic;
mod sequences;

pub use io::EXIT_SENTINEL;
pub(crate) use io::run_source;

use crate::error::{Error, Result};
use crate::runtime::{Environment, Value};

/// Identifier for a native operation
///
/// A closed enum rather than function pointers, so native equality is a
/// plain tag comparison and `Function` values stay `PartialEq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOp {
    // Arithmetic
    /// `+` / `add`
    Add,
    /// `-` / `sub`; unary negation with a single operand
    Sub,
    /// `*` / `mul`
    Mul,
    /// `/` / `div`; integer division truncates toward zero
    Div,
    /// `%` / `mod`; Integer operands only
    Mod,
    /// `^` / `pow`; always yields Decimal
    Pow,
    /// `min`
    Min,
    /// `max`
    Max,

    // Ordering comparisons
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,

    // Structural equality
    /// `==`
    Eq,
    /// `!=`
    NotEq,

    // Logical connectives
    /// `&&` / `and`
    And,
    /// `||` / `or`
    Or,
    /// `not` / `!`
    Not,

    /// `if`: the language's only short-circuit point
    If,

    // Sequence operations
    /// `list`
    List,
    /// `head`
    Head,
    /// `tail`
    Tail,
    /// `eval`
    Eval,
    /// `join`
    Join,
    /// `cons`
    Cons,
    /// `init`
    Init,
    /// `len`
    Len,
    /// `read`
    Read,

    // Binding forms
    /// `def`: bind in the global frame
    Def,
    /// `=`: bind in the current frame
    Put,
    /// `\`: lambda literal
    Lambda,
    /// `fun`: named-function sugar over `\` + `def`
    Fun,

    // Miscellaneous
    /// `env`: current-frame introspection
    Env,
    /// `exit`: returns the sentinel the front end stops on
    Exit,
    /// `print`
    Print,
    /// `error`: user-raised error
    Error,
    /// `load`: evaluate a source file form by form
    Load,
}

impl NativeOp {
    /// Canonical name used when printing a native function value
    pub fn name(&self) -> &'static str {
        match self {
            NativeOp::Add => "add",
            NativeOp::Sub => "sub",
            NativeOp::Mul => "mul",
            NativeOp::Div => "div",
            NativeOp::Mod => "mod",
            NativeOp::Pow => "pow",
            NativeOp::Min => "min",
            NativeOp::Max => "max",
            NativeOp::Less => "<",
            NativeOp::Greater => ">",
            NativeOp::LessEq => "<=",
            NativeOp::GreaterEq => ">=",
            NativeOp::Eq => "==",
            NativeOp::NotEq => "!=",
            NativeOp::And => "and",
            NativeOp::Or => "or",
            NativeOp::Not => "not",
            NativeOp::If => "if",
            NativeOp::List => "list",
            NativeOp::Head => "head",
            NativeOp::Tail => "tail",
            NativeOp::Eval => "eval",
            NativeOp::Join => "join",
            NativeOp::Cons => "cons",
            NativeOp::Init => "init",
            NativeOp::Len => "len",
            NativeOp::Read => "read",
            NativeOp::Def => "def",
            NativeOp::Put => "=",
            NativeOp::Lambda => "lambda",
            NativeOp::Fun => "fun",
            NativeOp::Env => "env",
            NativeOp::Exit => "exit",
            NativeOp::Print => "print",
            NativeOp::Error => "error",
            NativeOp::Load => "load",
        }
    }
}

/// Registers the builtin library into an environment (normally the global
/// frame, before any user input is evaluated)
pub fn register_all(env: &Environment) {
    let table: &[(&str, NativeOp)] = &[
        ("exit", NativeOp::Exit),
        // Variable and lambda functions
        ("def", NativeOp::Def),
        ("=", NativeOp::Put),
        ("env", NativeOp::Env),
        ("\\", NativeOp::Lambda),
        ("fun", NativeOp::Fun),
        // List functions
        ("list", NativeOp::List),
        ("head", NativeOp::Head),
        ("tail", NativeOp::Tail),
        ("eval", NativeOp::Eval),
        ("join", NativeOp::Join),
        ("cons", NativeOp::Cons),
        ("init", NativeOp::Init),
        ("len", NativeOp::Len),
        // Mathematical functions
        ("+", NativeOp::Add),
        ("add", NativeOp::Add),
        ("-", NativeOp::Sub),
        ("sub", NativeOp::Sub),
        ("*", NativeOp::Mul),
        ("mul", NativeOp::Mul),
        ("/", NativeOp::Div),
        ("div", NativeOp::Div),
        ("%", NativeOp::Mod),
        ("mod", NativeOp::Mod),
        ("^", NativeOp::Pow),
        ("pow", NativeOp::Pow),
        ("min", NativeOp::Min),
        ("max", NativeOp::Max),
        // Conditional and ordering functions
        ("<", NativeOp::Less),
        (">", NativeOp::Greater),
        ("==", NativeOp::Eq),
        ("!=", NativeOp::NotEq),
        ("<=", NativeOp::LessEq),
        (">=", NativeOp::GreaterEq),
        ("if", NativeOp::If),
        ("not", NativeOp::Not),
        ("!", NativeOp::Not),
        ("||", NativeOp::Or),
        ("or", NativeOp::Or),
        ("&&", NativeOp::And),
        ("and", NativeOp::And),
        // String functions
        ("load", NativeOp::Load),
        ("print", NativeOp::Print),
        ("error", NativeOp::Error),
        ("read", NativeOp::Read),
    ];

    for (name, op) in table {
        env.put(*name, Value::native(*op));
    }
}

/// Routes a native call to its implementation. Implementations validate
/// arity and types eagerly and take ownership of the argument list.
pub fn dispatch(env: &Environment, op: NativeOp, args: Vec<Value>) -> Result<Value> {
    match op {
        NativeOp::Add | NativeOp::Sub | NativeOp::Mul | NativeOp::Div | NativeOp::Mod
        | NativeOp::Min | NativeOp::Max => arithmetic::fold(op, args),
        NativeOp::Pow => arithmetic::pow(args),

        NativeOp::Less | NativeOp::Greater | NativeOp::LessEq | NativeOp::GreaterEq => {
            comparison::ordering(op, args)
        }
        NativeOp::Eq | NativeOp::NotEq => comparison::equality(op, args),

        NativeOp::And | NativeOp::Or => logic::connective(op, args),
        NativeOp::Not => logic::not(args),
        NativeOp::If => logic::branch(env, args),

        NativeOp::List => sequences::list(args),
        NativeOp::Head => sequences::head(args),
        NativeOp::Tail => sequences::tail(args),
        NativeOp::Eval => sequences::eval_quoted(env, args),
        NativeOp::Join => sequences::join(args),
        NativeOp::Cons => sequences::cons(args),
        NativeOp::Init => sequences::init(args),
        NativeOp::Len => sequences::len(args),
        NativeOp::Read => sequences::read(args),

        NativeOp::Def => bindings::def(env, args),
        NativeOp::Put => bindings::put(env, args),
        NativeOp::Lambda => bindings::lambda(args),
        NativeOp::Fun => bindings::fun(env, args),

        NativeOp::Env => io::env_snapshot(env, args),
        NativeOp::Exit => io::exit(args),
        NativeOp::Print => io::print(args),
        NativeOp::Error => io::error(args),
        NativeOp::Load => io::load(env, args),
    }
}

/// Checks the exact argument count for a builtin
pub(crate) fn expect_arity(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::ArityMismatch {
            name: name.to_string(),
            given: args.len(),
            expected,
        });
    }
    Ok(())
}

/// Builds the standard wrong-type error for a builtin operand
pub(crate) fn type_mismatch(name: &str, expected: &str, got: &Value) -> Error {
    Error::TypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    }
}
