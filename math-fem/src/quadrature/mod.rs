//! Numerical quadrature rules for finite element integration
//!
//! Provides Gauss-Legendre rules for tetrahedra and hexahedra.

mod gauss;
mod rules;

pub use gauss::*;
pub use rules::*;
