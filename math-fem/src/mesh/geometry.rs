//! Per-element geometry queries
//!
//! Node coordinates, centroids, volumes and the precise point containment
//! predicate used by point-location structures.

use super::bbox::BoundingBox;
use super::types::{Mesh, Point};
use crate::basis::{evaluate_shape, inverse_map, on_reference_element};
use crate::error::MapError;
use crate::quadrature::QuadratureRule;

/// Relative slack on the quick-reject box, covering faces that bulge past
/// their nodes
const CONTAINS_BOX_SLACK: f64 = 0.25;

/// Smallest Newton update accepted as converged by the containment pull-back
const MIN_PULL_BACK_TOLERANCE: f64 = 1e-13;

impl Mesh {
    /// Physical coordinates of all nodes of an element, in local node order
    pub fn element_points(&self, elem_idx: usize) -> Vec<Point> {
        self.elements[elem_idx]
            .nodes
            .iter()
            .map(|&n| self.nodes[n])
            .collect()
    }

    /// Compute element centroid (vertex average)
    pub fn element_centroid(&self, elem_idx: usize) -> Point {
        let verts = self.elements[elem_idx].vertices();
        let sum = verts
            .iter()
            .fold(Point::origin(), |acc, &v| acc + self.nodes[v]);
        sum * (1.0 / verts.len() as f64)
    }

    /// Axis-aligned bounding box of all element nodes
    ///
    /// For curved quadratic elements this is the box of the nodes, which may
    /// undercut a bulging face; callers that need a guaranteed enclosure
    /// inflate it.
    pub fn element_bounding_box(&self, elem_idx: usize) -> BoundingBox {
        let elem = &self.elements[elem_idx];
        let first = self.nodes[elem.nodes[0]];
        let mut bbox = BoundingBox::new(first, first);
        for &n in &elem.nodes[1..] {
            bbox.extend(&self.nodes[n]);
        }
        bbox
    }

    /// Bounding box of the whole mesh, `None` if it has no nodes
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.nodes)
    }

    /// Element volume by Gauss quadrature of the Jacobian determinant
    pub fn element_volume(&self, elem_idx: usize) -> Result<f64, MapError> {
        let element_type = self.elements[elem_idx].element_type;
        let coords = self.element_points(elem_idx);
        let rule = QuadratureRule::new(element_type, 2 * element_type.degree());

        let mut volume = 0.0;
        for qp in rule.iter() {
            let shape = evaluate_shape(element_type, qp.xi(), qp.eta(), qp.zeta());
            let jac = shape.jacobian(&coords)?;
            volume += jac.det.abs() * qp.weight;
        }
        Ok(volume)
    }

    /// Sum of all element volumes
    pub fn volume(&self) -> Result<f64, MapError> {
        (0..self.num_elements()).map(|e| self.element_volume(e)).sum()
    }

    /// Test whether `p` lies inside element `elem_idx`.
    ///
    /// Points far outside the element's box are rejected without a pull-back.
    /// Otherwise the point is pulled back to the reference element and accepted when
    /// its reference coordinates are within `tol` of the reference domain.
    /// A pull-back that fails to converge means the point is not contained.
    pub fn contains_point(&self, elem_idx: usize, p: &Point, tol: f64) -> bool {
        let element_type = self.elements[elem_idx].element_type;
        self.pull_back(elem_idx, p, tol, tol)
            .is_some_and(|xi| on_reference_element(element_type, xi, tol))
    }

    /// Test whether `p` lies inside element `elem_idx` at least `margin`
    /// away from every face, measured in reference coordinates.
    ///
    /// Points on or near a face shared with a neighbour are rejected, so an
    /// accepted point belongs to this element alone.
    pub fn contains_point_interior(&self, elem_idx: usize, p: &Point, margin: f64) -> bool {
        let element_type = self.elements[elem_idx].element_type;
        self.pull_back(elem_idx, p, 0.0, margin)
            .is_some_and(|xi| on_reference_element(element_type, xi, -margin))
    }

    /// Reference coordinates of `p`, converged to a tenth of `accuracy`.
    /// `None` when `p` is outside the box slack or the pull-back fails.
    fn pull_back(
        &self,
        elem_idx: usize,
        p: &Point,
        slack: f64,
        accuracy: f64,
    ) -> Option<[f64; 3]> {
        let bbox = self.element_bounding_box(elem_idx);
        if !bbox.contains(p, CONTAINS_BOX_SLACK * bbox.diagonal() + slack) {
            return None;
        }
        let element_type = self.elements[elem_idx].element_type;
        let coords = self.element_points(elem_idx);
        let tolerance = (0.1 * accuracy).max(MIN_PULL_BACK_TOLERANCE);
        inverse_map(element_type, &coords, p, tolerance).ok()
    }
}
