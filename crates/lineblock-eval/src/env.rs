//! Scoped variable store.
//!
//! Variables are anonymous: a variable's identity is the length of the
//! `VAR_INDEX` chain that names it. All variables live in one flat list, each
//! tagged with the block depth that created it.

use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
struct Variable {
    index: usize,
    value: Value,
    depth: usize,
}

/// Flat variable list plus the current block depth.
///
/// `assign` replaces the variable with the same index created at the current
/// depth, or creates one there. A write inside a block therefore shadows an
/// outer variable of the same index until the block exits. At most one
/// variable per index lives at each depth.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: Vec<Variable>,
    depth: usize,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block depth. `0` outside any block.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a block. Returns the enclosing depth to hand back to [`exit`].
    ///
    /// [`exit`]: Environment::exit
    pub fn enter(&mut self) -> usize {
        let enclosing = self.depth;
        self.depth += 1;
        enclosing
    }

    /// Leave a block, purging every variable created deeper than `enclosing`.
    pub fn exit(&mut self, enclosing: usize) {
        self.depth = enclosing;
        self.vars.retain(|v| v.depth <= enclosing);
    }

    /// The innermost live variable with `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.vars
            .iter()
            .rev()
            .find(|v| v.index == index)
            .map(|v| &v.value)
    }

    pub fn assign(&mut self, index: usize, value: Value) {
        let depth = self.depth;
        match self
            .vars
            .iter_mut()
            .find(|v| v.index == index && v.depth == depth)
        {
            Some(var) => var.value = value,
            None => self.vars.push(Variable {
                index,
                value,
                depth,
            }),
        }
    }

    /// Number of live variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_exit_purges_inner_variables() {
        let mut env = Environment::new();
        let root = env.enter();
        env.assign(0, Value::Int(1));

        let outer = env.enter();
        env.assign(1, Value::Int(2));
        assert_eq!(env.len(), 2);
        env.exit(outer);

        assert_eq!(env.get(1), None);
        assert_eq!(env.get(0), Some(&Value::Int(1)));
        env.exit(root);
        assert!(env.is_empty());
    }

    #[test]
    fn test_inner_write_shadows_outer_variable() {
        let mut env = Environment::new();
        env.enter();
        env.assign(2, Value::Int(1));

        let outer = env.enter();
        env.assign(2, Value::Int(9));
        assert_eq!(env.len(), 2);
        assert_eq!(env.get(2), Some(&Value::Int(9)));
        env.exit(outer);

        assert_eq!(env.get(2), Some(&Value::Int(1)));
    }

    #[test]
    fn test_write_at_same_depth_replaces() {
        let mut env = Environment::new();
        env.enter();
        env.assign(0, Value::Int(1));
        env.assign(0, Value::Str("x".into()));
        assert_eq!(env.len(), 1);
        assert_eq!(env.get(0), Some(&Value::Str("x".into())));
    }

    #[test]
    fn test_depth_tracking() {
        let mut env = Environment::new();
        assert_eq!(env.depth(), 0);
        let a = env.enter();
        let b = env.enter();
        assert_eq!(env.depth(), 2);
        env.exit(b);
        assert_eq!(env.depth(), 1);
        env.exit(a);
        assert_eq!(env.depth(), 0);
    }
}
