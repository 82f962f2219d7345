//! Per-step validation context: property path and visited-pair tracking.

use serde_json::Value;

/// Where in the instance tree the current validation step is running.
///
/// A context is never mutated in place. Each recursive descent builds a new
/// context with the path extended (`extend_key` / `extend_index`) and the
/// (schema, instance) pair recorded, so sibling branches cannot observe each
/// other's state.
#[derive(Debug, Clone)]
pub struct Context {
    path: String,
    visited: Vec<(usize, usize)>,
    defaults: bool,
}

impl Context {
    /// Creates a root context whose path starts at `root`.
    pub fn new(root: impl Into<String>) -> Self {
        Context {
            path: root.into(),
            visited: Vec::new(),
            defaults: true,
        }
    }

    /// The dot/bracket-addressed property path, e.g. `body.items[2].name`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Child context for the object property `key`.
    pub fn extend_key(&self, key: &str) -> Context {
        Context {
            path: format!("{}.{}", self.path, key),
            visited: self.visited.clone(),
            defaults: self.defaults,
        }
    }

    /// Child context for the array element at `index`.
    pub fn extend_index(&self, index: usize) -> Context {
        Context {
            path: format!("{}[{}]", self.path, index),
            visited: self.visited.clone(),
            defaults: self.defaults,
        }
    }

    /// Records the (schema, instance) pair being entered on this branch.
    pub(crate) fn enter(&self, schema: &Value, instance: Option<&Value>) -> Context {
        let mut visited = self.visited.clone();
        visited.push(Self::identity(schema, instance));
        Context {
            path: self.path.clone(),
            visited,
            defaults: self.defaults,
        }
    }

    /// Whether the exact (schema, instance) pair already sits on this branch.
    pub fn has_visited(&self, schema: &Value, instance: Option<&Value>) -> bool {
        self.visited.contains(&Self::identity(schema, instance))
    }

    /// Context for speculative validation: defaults are never written back.
    pub(crate) fn without_defaults(&self) -> Context {
        Context {
            path: self.path.clone(),
            visited: self.visited.clone(),
            defaults: false,
        }
    }

    pub(crate) fn defaults_enabled(&self) -> bool {
        self.defaults
    }

    fn identity(schema: &Value, instance: Option<&Value>) -> (usize, usize) {
        (
            schema as *const Value as usize,
            instance.map_or(0, |v| v as *const Value as usize),
        )
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new("instance")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_extension() {
        let root = Context::new("instance");
        let child = root.extend_key("body").extend_index(2).extend_key("name");
        assert_eq!(child.path(), "instance.body[2].name");
        // The parent is untouched.
        assert_eq!(root.path(), "instance");
    }

    #[test]
    fn test_seeded_root_path() {
        let ctx = Context::new("request.payload");
        assert_eq!(ctx.extend_key("id").path(), "request.payload.id");
    }

    #[test]
    fn test_visited_pairs() {
        let schema = json!({"type": "object"});
        let instance = json!({});
        let ctx = Context::new("instance");
        assert!(!ctx.has_visited(&schema, Some(&instance)));
        let entered = ctx.enter(&schema, Some(&instance));
        assert!(entered.has_visited(&schema, Some(&instance)));
        // Identity, not structure: an equal but distinct value is unseen.
        let other = json!({});
        assert!(!entered.has_visited(&schema, Some(&other)));
    }

    #[test]
    fn test_defaults_flag() {
        let ctx = Context::new("instance");
        assert!(ctx.defaults_enabled());
        let trial = ctx.without_defaults();
        assert!(!trial.defaults_enabled());
        assert!(!trial.extend_key("p").defaults_enabled());
    }
}
