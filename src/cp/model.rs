//! CP model definition.
//!
//! A model is a set of named boolean/integer decision variables plus
//! linear constraints over them: `Σ coeff·var  ⋚  bound`. This is the
//! full vocabulary the rostering formulation needs; richer global
//! constraints belong to the solver collaborator, not here.

use super::variables::{BoolVar, IntVar};
use std::collections::HashMap;

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Expression ≤ bound.
    LessOrEqual,
    /// Expression ≥ bound.
    GreaterOrEqual,
    /// Expression = bound.
    Equal,
}

/// An affine combination of declared variables.
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    /// (variable name, coefficient) pairs.
    pub terms: Vec<(String, i64)>,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit-coefficient sum over the given variable names.
    pub fn sum<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: vars.into_iter().map(|v| (v.into(), 1)).collect(),
        }
    }

    /// Appends a term.
    pub fn term(mut self, var: impl Into<String>, coeff: i64) -> Self {
        self.terms.push((var.into(), coeff));
        self
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// A linear constraint: `expr comparator bound`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Comparison operator.
    pub comparator: Comparator,
    /// Right-hand side constant.
    pub bound: i64,
}

/// A constraint programming model.
///
/// Variable names double as handles: declaring a variable returns its
/// name, and constraints reference variables by name.
///
/// # Examples
///
/// ```
/// use nurse_roster::cp::{Comparator, CpModel, LinearExpr};
///
/// let mut model = CpModel::new("example");
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// model.add_linear(LinearExpr::sum([a, b]), Comparator::LessOrEqual, 1);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CpModel {
    /// Model name.
    pub name: String,
    /// Boolean variables by name.
    pub bool_vars: HashMap<String, BoolVar>,
    /// Integer variables by name.
    pub int_vars: HashMap<String, IntVar>,
    /// Constraints, in insertion order.
    pub constraints: Vec<LinearConstraint>,
}

impl CpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bool_vars: HashMap::new(),
            int_vars: HashMap::new(),
            constraints: Vec::new(),
        }
    }

    /// Declares a boolean variable and returns its handle (the name).
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> String {
        let name = name.into();
        self.bool_vars.insert(name.clone(), BoolVar::new(&name));
        name
    }

    /// Declares a bounded integer variable and returns its handle.
    pub fn new_int_var(&mut self, name: impl Into<String>, min: i64, max: i64) -> String {
        let name = name.into();
        self.int_vars.insert(name.clone(), IntVar::new(&name, min, max));
        name
    }

    /// Adds a linear constraint.
    pub fn add_linear(&mut self, expr: LinearExpr, comparator: Comparator, bound: i64) {
        self.constraints.push(LinearConstraint {
            expr,
            comparator,
            bound,
        });
    }

    /// Whether a variable of either kind is declared.
    pub fn is_declared(&self, name: &str) -> bool {
        self.bool_vars.contains_key(name) || self.int_vars.contains_key(name)
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every constraint references only declared variables,
    /// that no constraint is empty, and that integer domains are
    /// non-empty.
    pub fn validate(&self) -> Result<(), String> {
        for var in self.int_vars.values() {
            if var.min > var.max {
                return Err(format!(
                    "empty domain [{}, {}] for variable {}",
                    var.min, var.max, var.name
                ));
            }
        }
        for constraint in &self.constraints {
            if constraint.expr.is_empty() {
                return Err("constraint with empty expression".into());
            }
            for (name, _) in &constraint.expr.terms {
                if !self.is_declared(name) {
                    return Err(format!("undefined variable: {name}"));
                }
            }
        }
        Ok(())
    }

    /// Returns the number of boolean variables.
    pub fn bool_var_count(&self) -> usize {
        self.bool_vars.len()
    }

    /// Returns the number of integer variables.
    pub fn int_var_count(&self) -> usize {
        self.int_vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let mut model = CpModel::new("test");
        let a = model.new_bool_var("a");
        let b = model.new_bool_var("b");
        let t = model.new_int_var("t", 0, 10);
        model.add_linear(LinearExpr::sum([a, b]), Comparator::LessOrEqual, 1);
        model.add_linear(
            LinearExpr::new().term(t, 1).term("a", -1),
            Comparator::Equal,
            0,
        );

        assert_eq!(model.bool_var_count(), 2);
        assert_eq!(model.int_var_count(), 1);
        assert_eq!(model.constraint_count(), 2);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_undefined_variable() {
        let mut model = CpModel::new("test");
        model.add_linear(LinearExpr::sum(["nonexistent"]), Comparator::LessOrEqual, 1);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_empty_expression() {
        let mut model = CpModel::new("test");
        model.add_linear(LinearExpr::new(), Comparator::Equal, 0);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_empty_int_domain() {
        let mut model = CpModel::new("test");
        model.new_int_var("x", 5, 3);
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_expr_builders() {
        let e = LinearExpr::sum(["a", "b", "c"]);
        assert_eq!(e.len(), 3);
        assert!(e.terms.iter().all(|(_, c)| *c == 1));

        let e = LinearExpr::new().term("x", 8).term("y", -8);
        assert_eq!(e.terms, [("x".to_string(), 8), ("y".to_string(), -8)]);
    }
}
