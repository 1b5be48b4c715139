//! Field paths for qualifying validation errors
use std::fmt;

/// A dotted, index-qualified path to a field within a resource spec,
/// e.g. `spec.listeners[0].services[1].name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// Create a path rooted at the given field name.
    pub fn new(root: &str) -> Self {
        Self(root.to_string())
    }

    /// Append a child field to the path.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    /// Append a collection index to the path.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_building() {
        let path = FieldPath::new("spec")
            .child("listeners")
            .index(0)
            .child("services")
            .index(1)
            .child("name");
        assert_eq!(path.to_string(), "spec.listeners[0].services[1].name");
    }

    #[test]
    fn test_root_path() {
        assert_eq!(FieldPath::new("name").to_string(), "name");
    }
}
