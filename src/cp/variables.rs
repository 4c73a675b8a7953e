//! CP variable types.

/// An integer variable with a domain [min, max].
#[derive(Debug, Clone)]
pub struct IntVar {
    /// Variable name (unique identifier within a model).
    pub name: String,
    /// Minimum value.
    pub min: i64,
    /// Maximum value.
    pub max: i64,
}

impl IntVar {
    /// Creates a new integer variable with the given bounds.
    pub fn new(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }
}

/// A boolean variable (0/1 decision).
#[derive(Debug, Clone)]
pub struct BoolVar {
    /// Variable name.
    pub name: String,
}

impl BoolVar {
    /// Creates a new boolean variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_var() {
        let v = IntVar::new("x", 0, 10);
        assert_eq!((v.min, v.max), (0, 10));
    }

    #[test]
    fn test_bool_var() {
        let b = BoolVar::new("flag");
        assert_eq!(b.name, "flag");
    }
}
