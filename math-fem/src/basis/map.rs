//! Reference-to-physical mapping and its inverse

use super::shape::evaluate_shape;
use crate::error::MapError;
use crate::mesh::{ElementType, Point};

/// Maximum Newton iterations for [`inverse_map`]
pub const MAX_NEWTON_ITERATIONS: usize = 25;

/// Map a reference point to physical space
pub fn map_to_physical(element_type: ElementType, coords: &[Point], xi: [f64; 3]) -> Point {
    evaluate_shape(element_type, xi[0], xi[1], xi[2]).map(coords)
}

/// Find the reference coordinates of physical point `p` in the element
/// with node coordinates `coords`.
///
/// Newton iteration from the reference centroid; converged when the
/// reference-space update is below `tolerance`. Affine elements converge
/// in one step.
pub fn inverse_map(
    element_type: ElementType,
    coords: &[Point],
    p: &Point,
    tolerance: f64,
) -> Result<[f64; 3], MapError> {
    let mut xi = element_type.reference_centroid();
    let mut update = f64::INFINITY;

    for _ in 0..MAX_NEWTON_ITERATIONS {
        let shape = evaluate_shape(element_type, xi[0], xi[1], xi[2]);
        let residual = shape.map(coords) - *p;
        let jac = shape.jacobian(coords)?;
        let dxi = jac.solve(residual.to_array());

        for k in 0..3 {
            xi[k] -= dxi[k];
        }
        update = (dxi[0] * dxi[0] + dxi[1] * dxi[1] + dxi[2] * dxi[2]).sqrt();
        if !update.is_finite() {
            break;
        }
        if update < tolerance {
            return Ok(xi);
        }
    }

    Err(MapError::NotConverged {
        iterations: MAX_NEWTON_ITERATIONS,
        update,
    })
}

/// Whether reference point `xi` lies on the reference element, allowing
/// `eps` slack on every bounding face
pub fn on_reference_element(element_type: ElementType, xi: [f64; 3], eps: f64) -> bool {
    if element_type.is_tetrahedron() {
        xi.iter().all(|&x| x >= -eps) && xi[0] + xi[1] + xi[2] <= 1.0 + eps
    } else {
        xi.iter().all(|&x| x.abs() <= 1.0 + eps)
    }
}
