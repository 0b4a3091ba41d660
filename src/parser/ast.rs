use serde::{Deserialize, Serialize};

/// A node of the parse tree
///
/// Forms are plain data: the parser performs literal classification
/// (integer vs. decimal, `true`/`false` vs. symbol, string unescaping) but
/// carries no evaluation semantics. The runtime reads forms into
/// [`crate::runtime::Value`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Form {
    /// Integer literal
    Integer(i64),
    /// Decimal literal (the literal contained a `.`)
    Decimal(f64),
    /// Boolean literal (`true` / `false`)
    Boolean(bool),
    /// String literal, quotes stripped and escapes processed
    Str(String),
    /// Symbol
    Symbol(String),
    /// Evaluable S-expression `( ... )` with ordered children
    Sexpr(Vec<Form>),
    /// Quoted Q-expression `{ ... }` with ordered children
    Qexpr(Vec<Form>),
}

/// The root node: an ordered list of top-level forms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level forms in source order
    pub forms: Vec<Form>,
}
