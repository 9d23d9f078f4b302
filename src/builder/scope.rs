use std::collections::HashMap;

/// Stack of name to value frames for nested lexical scopes.
///
/// Lookups search from the innermost frame outwards. The outermost frame is
/// created with the stack and is never popped.
#[derive(Debug, Clone)]
pub struct ScopeStack<T> {
    frames: Vec<HashMap<String, T>>,
}

impl<T> Default for ScopeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScopeStack<T> {
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![HashMap::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Drops the innermost frame and its bindings.
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Binds `name` in the innermost frame, shadowing outer bindings.
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.into(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
