//! Finite element building blocks for solution transfer between meshes
//!
//! This crate provides the element-level machinery needed to evaluate a
//! nodal finite element field at arbitrary points of a 3D mesh.
//!
//! # Features
//!
//! - **3D meshes**: linear and quadratic tetrahedra and hexahedra
//! - **Lagrange elements**: P1, P2 (tetrahedra) and Q1, Q2 (hexahedra)
//! - **Gauss quadrature**: tensor and collapsed rules of any order
//! - **Reference mappings**: forward map, Jacobian and Newton inverse map
//!
//! # Example
//!
//! ```
//! use math_fem::{mesh, ElementType};
//! use math_fem::mesh::Point;
//!
//! let mesh = mesh::unit_cube(ElementType::Hex8, 2);
//! assert_eq!(mesh.num_elements(), 8);
//! assert!(mesh.contains_point(0, &Point::new(0.25, 0.25, 0.25), 1e-6));
//! ```

pub mod basis;
pub mod error;
pub mod mesh;
pub mod quadrature;

pub use error::{MapError, MeshError};
pub use mesh::{Element, ElementType, Mesh};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
