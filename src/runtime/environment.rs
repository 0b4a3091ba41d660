use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::value::{Function, Value};

/// Reserved name that bypasses lookup and yields a snapshot of the current
/// frame's bindings.
const INTROSPECTION_NAME: &str = "env";

/// Environment for symbol scoping
///
/// An `Environment` is a handle to one frame of a parent-linked chain
/// rooted at the global frame. Cloning the handle shares the frame
/// (several closures may point at the same live global frame);
/// [`Environment::deep_clone`] copies the binding table instead.
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

/// Single frame in the scope chain
#[derive(Default)]
struct Frame {
    /// Bindings defined in this frame
    bindings: HashMap<String, Value>,
    /// Parent frame, shared; `None` for the root frame
    parent: Option<Environment>,
}

impl Environment {
    /// Creates a new root frame with no parent and no bindings
    pub fn new() -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame::default())),
        }
    }

    /// Gets a clone of the nearest binding for `name`, walking from this
    /// frame to the root. The reserved name `env` short-circuits lookup
    /// and returns the current frame's bindings as a Qexpr of
    /// `{name value}` pairs.
    pub fn get(&self, name: &str) -> Result<Value> {
        if name == INTROSPECTION_NAME {
            return Ok(self.snapshot());
        }

        let mut current = self.clone();
        loop {
            if let Some(value) = current.frame.borrow().bindings.get(name) {
                return Ok(value.clone());
            }
            let parent = current.frame.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => {
                    return Err(Error::UnboundSymbol {
                        name: name.to_string(),
                    })
                }
            }
        }
    }

    /// Defines or overwrites a binding in this frame only. The incoming
    /// value is moved; the previous value, if any, is dropped.
    pub fn put(&self, name: impl Into<String>, value: Value) {
        self.frame.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Defines or overwrites a binding in the root frame, so nested code
    /// can still create globals.
    pub fn define_global(&self, name: impl Into<String>, value: Value) {
        self.root().put(name, value);
    }

    /// Deep-clones the binding table; the parent reference is shared, not
    /// cloned. This is the environment copy taken when a closure is cloned.
    pub fn deep_clone(&self) -> Environment {
        let frame = self.frame.borrow();
        Environment {
            frame: Rc::new(RefCell::new(Frame {
                bindings: frame.bindings.clone(),
                parent: frame.parent.clone(),
            })),
        }
    }

    /// Reparents this frame. The call protocol uses this to point a
    /// saturated closure's frame at the calling environment.
    pub fn set_parent(&self, parent: Environment) {
        self.frame.borrow_mut().parent = Some(parent);
    }

    /// Walks to the root frame of the chain
    pub fn root(&self) -> Environment {
        let mut current = self.clone();
        loop {
            let parent = current.frame.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return current,
            }
        }
    }

    /// True when `name` is bound to a Native function in the root frame.
    /// Only such bindings are protected from redefinition.
    pub fn is_global_native(&self, name: &str) -> bool {
        matches!(
            self.root().frame.borrow().bindings.get(name),
            Some(Value::Fun(Function::Native(_)))
        )
    }

    /// Snapshot of this frame's own bindings (parents excluded) as a Qexpr
    /// of `{name value}` pairs, sorted by name for deterministic output.
    pub fn snapshot(&self) -> Value {
        let frame = self.frame.borrow();
        let mut pairs: Vec<(&String, &Value)> = frame.bindings.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        Value::Qexpr(
            pairs
                .into_iter()
                .map(|(name, value)| {
                    Value::Qexpr(vec![Value::Sym(name.clone()), value.clone()])
                })
                .collect(),
        )
    }
}

impl Clone for Environment {
    /// Shares the underlying frame; see [`Environment::deep_clone`] for a
    /// binding-table copy.
    fn clone(&self) -> Self {
        Environment {
            frame: Rc::clone(&self.frame),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let frame = self.frame.borrow();
        write!(
            f,
            "Environment({} bindings{})",
            frame.bindings.len(),
            if frame.parent.is_some() {
                ", chained"
            } else {
                ", root"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_put_and_get() {
        let env = Environment::new();
        env.put("x", Value::Int(42));
        assert_eq!(env.get("x").unwrap(), Value::Int(42));
    }

    #[test]
    fn test_unbound_symbol() {
        let env = Environment::new();
        assert_eq!(
            env.get("missing").unwrap_err(),
            Error::UnboundSymbol {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_last_write_wins() {
        let env = Environment::new();
        env.put("x", Value::Int(1));
        env.put("x", Value::Int(2));
        assert_eq!(env.get("x").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_lookup_walks_to_root() {
        let global = Environment::new();
        global.put("x", Value::Int(10));

        let local = Environment::new();
        local.set_parent(global.clone());
        local.put("y", Value::Int(20));

        assert_eq!(local.get("x").unwrap(), Value::Int(10));
        assert_eq!(local.get("y").unwrap(), Value::Int(20));
        assert!(global.get("y").is_err());
    }

    #[test]
    fn test_shadowing() {
        let global = Environment::new();
        global.put("x", Value::Int(1));

        let local = Environment::new();
        local.set_parent(global.clone());
        local.put("x", Value::Str("shadow".to_string()));

        assert_eq!(local.get("x").unwrap(), Value::Str("shadow".to_string()));
        assert_eq!(global.get("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_define_global_from_nested_frame() {
        let global = Environment::new();
        let local = Environment::new();
        local.set_parent(global.clone());

        local.define_global("g", Value::Int(7));
        assert_eq!(global.get("g").unwrap(), Value::Int(7));
    }

    #[test]
    fn test_deep_clone_detaches_bindings_but_shares_parent() {
        let global = Environment::new();
        global.put("free", Value::Int(1));

        let child = Environment::new();
        child.set_parent(global.clone());
        child.put("x", Value::Int(10));

        let copy = child.deep_clone();
        copy.put("x", Value::Int(99));

        // Binding tables are independent
        assert_eq!(child.get("x").unwrap(), Value::Int(10));
        assert_eq!(copy.get("x").unwrap(), Value::Int(99));

        // Parent is shared: later global definitions are visible to both
        global.put("late", Value::Int(2));
        assert_eq!(child.get("late").unwrap(), Value::Int(2));
        assert_eq!(copy.get("late").unwrap(), Value::Int(2));
    }

    #[test]
    fn test_env_introspection_snapshots_current_frame_only() {
        let global = Environment::new();
        global.put("hidden", Value::Int(0));

        let local = Environment::new();
        local.set_parent(global);
        local.put("b", Value::Int(2));
        local.put("a", Value::Int(1));

        let snapshot = local.get("env").unwrap();
        assert_eq!(
            snapshot,
            Value::Qexpr(vec![
                Value::Qexpr(vec![Value::Sym("a".to_string()), Value::Int(1)]),
                Value::Qexpr(vec![Value::Sym("b".to_string()), Value::Int(2)]),
            ])
        );
    }
}
