//! Error types for mesh validation and reference mappings

use crate::mesh::ElementType;
use thiserror::Error;

/// Mesh consistency errors
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("element {element} ({element_type:?}) has {actual} nodes, expected {expected}")]
    NodeCount {
        element: usize,
        element_type: ElementType,
        expected: usize,
        actual: usize,
    },
    #[error("element {element} references node {node} but the mesh has {num_nodes} nodes")]
    NodeIndex {
        element: usize,
        node: usize,
        num_nodes: usize,
    },
}

/// Failures of the reference-to-physical map or its inverse
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("singular Jacobian (det = {det:e})")]
    SingularJacobian { det: f64 },
    #[error("Newton iteration did not converge after {iterations} iterations (update norm {update:e})")]
    NotConverged { iterations: usize, update: f64 },
}
