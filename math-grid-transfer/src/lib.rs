//! Point location and field transfer between non-matching 3D meshes
//!
//! This crate locates arbitrary points in unstructured hexahedral and
//! tetrahedral meshes and uses that to compare a field computed on one
//! mesh ("coarse") with a field computed on another, overlapping mesh
//! ("fine").
//!
//! # Features
//!
//! - **Octree index**: bins of at most a configured number of elements,
//!   precise containment by inverse mapping
//! - **Cached locator**: consecutive queries test the last element first
//! - **L2 error**: quadrature over the fine mesh of (coarse - fine)^2
//! - **Nodal difference**: coarse - fine at every fine node, all variables
//!
//! # Example
//!
//! ```
//! use fem::ElementType;
//! use fem::mesh::unit_cube;
//! use math_grid_transfer::{FieldVector, GridTransfer, TransferConfig};
//!
//! let coarse = unit_cube(ElementType::Hex8, 1);
//! let fine = unit_cube(ElementType::Hex8, 2);
//! let cf = FieldVector::from_fn("u", coarse.num_nodes(), |_| 1.0);
//! let ff = FieldVector::from_fn("u", fine.num_nodes(), |_| 1.0);
//!
//! let transfer = GridTransfer::new(&coarse, &fine, &cf, &ff, TransferConfig::default())?;
//! assert!(transfer.l2_error(0)?.error < 1e-12);
//! # Ok::<(), math_grid_transfer::TransferError>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod io;
pub mod locator;
pub mod octree;
pub mod projector;
pub mod transfer;

pub use config::TransferConfig;
pub use error::{Result, TransferError};
pub use field::FieldVector;
pub use locator::{LocatorStats, PointLocator};
pub use octree::{OctTree, OctreeConfig};
pub use projector::{LagrangeMapping, Projector, ReferenceMapping};
pub use transfer::{ErrorReport, GridTransfer};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
