//! Quadrature rule selection based on element type and polynomial order

use super::gauss::{QuadraturePoint, gauss_hexahedron, gauss_tetrahedron};
use crate::mesh::ElementType;

/// Quadrature rule for a specific element type
#[derive(Debug, Clone)]
pub struct QuadratureRule {
    /// Element type this rule is for
    pub element_type: ElementType,
    /// Quadrature order (polynomial degree exactly integrated)
    pub order: usize,
    /// Quadrature points and weights
    pub points: Vec<QuadraturePoint>,
}

impl QuadratureRule {
    /// Create a quadrature rule for the given element type, exact for
    /// polynomials of total degree `order`
    pub fn new(element_type: ElementType, order: usize) -> Self {
        let points = if element_type.is_tetrahedron() {
            gauss_tetrahedron(points_per_direction_tet(order))
        } else {
            gauss_hexahedron(points_per_direction_hex(order))
        };

        Self {
            element_type,
            order,
            points,
        }
    }

    /// Number of quadrature points
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Iterator over quadrature points
    pub fn iter(&self) -> impl Iterator<Item = &QuadraturePoint> {
        self.points.iter()
    }
}

/// Gauss points per direction for a tensor rule of the given order
///
/// n points integrate degree 2n - 1 exactly, so n = ceil((order + 1) / 2)
pub fn points_per_direction_hex(order: usize) -> usize {
    order / 2 + 1
}

/// Gauss points per direction for a collapsed tetrahedral rule
///
/// The collapse adds up to two degrees in the first direction.
pub fn points_per_direction_tet(order: usize) -> usize {
    order / 2 + 2
}
