//! Error types for point location and field transfer.
//!
//! Every failure here is deterministic: a lookup or pull-back that fails
//! once fails again on retry, so all variants abort the current pass.

use fem::mesh::Point;
use fem::{MapError, MeshError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building an index or transferring a field.
#[derive(Debug, Error)]
pub enum TransferError {
    /// No element of the source mesh contains the query point.
    #[error("no element contains point ({:.6}, {:.6}, {:.6})", .point.x, .point.y, .point.z)]
    PointNotFound {
        /// The physical query point
        point: Point,
    },

    /// The inverse map failed for a point already located in an element.
    #[error("inverse map failed in element {element}: {source}")]
    InverseMap {
        /// Index of the containing element
        element: usize,
        /// Underlying mapping failure
        #[source]
        source: MapError,
    },

    /// The Jacobian of a target element is singular at a quadrature point.
    #[error("degenerate element {element}: {source}")]
    DegenerateElement {
        /// Index of the element in the target mesh
        element: usize,
        #[source]
        source: MapError,
    },

    /// The two fields do not carry the same ordered variable names.
    #[error("variable names differ: {coarse:?} vs {fine:?}")]
    VariableMismatch {
        /// Variables of the coarse (source) field
        coarse: Vec<String>,
        /// Variables of the fine (target) field
        fine: Vec<String>,
    },

    /// Requested variable index is out of range.
    #[error("variable index {index} out of range ({count} variables)")]
    VariableIndex {
        /// The requested index
        index: usize,
        /// Number of variables in the field
        count: usize,
    },

    /// No variable of this name.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// Field data does not match the node and variable counts.
    #[error("field has {actual} values, expected {expected} ({nodes} nodes x {variables} variables)")]
    FieldSize {
        expected: usize,
        actual: usize,
        nodes: usize,
        variables: usize,
    },

    /// The mesh has no elements to index.
    #[error("mesh has no elements")]
    EmptyMesh,

    /// The mesh failed its consistency check.
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),

    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransferError {
    /// Whether this error comes from geometry (point location or mapping)
    /// rather than from the inputs.
    pub fn is_geometric(&self) -> bool {
        matches!(
            self,
            TransferError::PointNotFound { .. }
                | TransferError::InverseMap { .. }
                | TransferError::DegenerateElement { .. }
        )
    }
}

/// Result type for transfer operations.
pub type Result<T> = std::result::Result<T, TransferError>;
