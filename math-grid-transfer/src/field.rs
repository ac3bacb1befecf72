//! Nodal field vectors
//!
//! A field stores one value per (node, variable) pair in a row-major
//! `Array2`, so the flat view is `node * n_variables + variable`.

use crate::error::{Result, TransferError};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

/// Per-node values of an ordered list of named variables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVector {
    variables: Vec<String>,
    values: Array2<f64>,
}

impl FieldVector {
    /// A field of zeros
    pub fn zeros(variables: Vec<String>, n_nodes: usize) -> Self {
        let n_vars = variables.len();
        Self {
            variables,
            values: Array2::zeros((n_nodes, n_vars)),
        }
    }

    /// Build a field from a node-major flat vector
    pub fn from_flat(variables: Vec<String>, n_nodes: usize, data: Vec<f64>) -> Result<Self> {
        let n_vars = variables.len();
        let expected = n_nodes * n_vars;
        if data.len() != expected {
            return Err(TransferError::FieldSize {
                expected,
                actual: data.len(),
                nodes: n_nodes,
                variables: n_vars,
            });
        }
        let values = Array2::from_shape_vec((n_nodes, n_vars), data).map_err(|_| {
            TransferError::FieldSize {
                expected,
                actual: expected,
                nodes: n_nodes,
                variables: n_vars,
            }
        })?;
        Ok(Self { variables, values })
    }

    /// Build a single-variable field by evaluating `f` at every node index
    pub fn from_fn<F>(variable: &str, n_nodes: usize, f: F) -> Self
    where
        F: Fn(usize) -> f64,
    {
        Self {
            variables: vec![variable.to_string()],
            values: Array2::from_shape_fn((n_nodes, 1), |(n, _)| f(n)),
        }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn n_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn n_nodes(&self) -> usize {
        self.values.nrows()
    }

    /// Index of a variable by name
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v == name)
    }

    /// Whether both fields carry the same ordered variable names
    pub fn same_schema(&self, other: &FieldVector) -> bool {
        self.variables == other.variables
    }

    #[inline]
    pub fn get(&self, node: usize, variable: usize) -> f64 {
        self.values[[node, variable]]
    }

    #[inline]
    pub fn set(&mut self, node: usize, variable: usize, value: f64) {
        self.values[[node, variable]] = value;
    }

    /// All variables at one node
    pub fn node_values(&self, node: usize) -> ArrayView1<'_, f64> {
        self.values.row(node)
    }

    /// One variable at all nodes
    pub fn variable_values(&self, variable: usize) -> ArrayView1<'_, f64> {
        self.values.column(variable)
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Node-major flat copy of the values
    pub fn to_flat(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// Largest absolute value over all entries
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }
}
