//! Finite element basis functions and reference mappings
//!
//! Implements Lagrange basis functions on the reference tetrahedron (P1, P2)
//! and hexahedron (Q1, Q2), the Jacobian of the reference-to-physical map,
//! and its Newton-based inverse.

mod lagrange;
mod map;
mod shape;

pub use lagrange::*;
pub use map::*;
pub use shape::*;
