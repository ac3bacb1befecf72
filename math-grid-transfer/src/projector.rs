//! Reference-space projection and interpolation
//!
//! [`ReferenceMapping`] is the capability the transfer needs from the
//! finite element layer: pull a physical point back into an element's
//! reference frame and evaluate the nodal basis there. [`LagrangeMapping`]
//! is the production implementation; tests can substitute their own.

use crate::error::{Result, TransferError};
use crate::field::FieldVector;
use fem::mesh::{ElementType, Point};
use fem::{MapError, Mesh, basis};

/// Inverse map and nodal basis of a family of elements
pub trait ReferenceMapping {
    /// Reference coordinates of `p` in the element with node coordinates
    /// `coords`, to within `tolerance`
    fn inverse_map(
        &self,
        element_type: ElementType,
        coords: &[Point],
        p: &Point,
        tolerance: f64,
    ) -> std::result::Result<[f64; 3], MapError>;

    /// Values of all nodal basis functions at reference point `xi`
    fn shape_values(&self, element_type: ElementType, xi: [f64; 3]) -> Vec<f64>;

    /// Value of the basis function of local node `node` at `xi`
    fn shape_value(&self, element_type: ElementType, node: usize, xi: [f64; 3]) -> f64 {
        self.shape_values(element_type, xi)[node]
    }
}

/// Lagrange bases with a Newton inverse map
#[derive(Debug, Clone, Copy, Default)]
pub struct LagrangeMapping;

impl ReferenceMapping for LagrangeMapping {
    fn inverse_map(
        &self,
        element_type: ElementType,
        coords: &[Point],
        p: &Point,
        tolerance: f64,
    ) -> std::result::Result<[f64; 3], MapError> {
        basis::inverse_map(element_type, coords, p, tolerance)
    }

    fn shape_values(&self, element_type: ElementType, xi: [f64; 3]) -> Vec<f64> {
        basis::evaluate_shape(element_type, xi[0], xi[1], xi[2]).values
    }
}

/// Interpolation state for the active element of a source mesh
#[derive(Debug)]
pub struct Projector<'a, M> {
    mesh: &'a Mesh,
    mapping: &'a M,
    tolerance: f64,
    element: usize,
    coords: Vec<Point>,
    reinits: usize,
}

impl<'a, M: ReferenceMapping> Projector<'a, M> {
    /// Projector positioned on the first element of `mesh`
    pub fn new(mesh: &'a Mesh, mapping: &'a M, tolerance: f64) -> Result<Self> {
        if mesh.num_elements() == 0 {
            return Err(TransferError::EmptyMesh);
        }
        Ok(Self {
            mesh,
            mapping,
            tolerance,
            element: 0,
            coords: mesh.element_points(0),
            reinits: 0,
        })
    }

    /// Make `element` the active element
    pub fn reinit(&mut self, element: usize) {
        self.element = element;
        self.coords = self.mesh.element_points(element);
        self.reinits += 1;
    }

    pub fn element(&self) -> usize {
        self.element
    }

    /// Number of [`Projector::reinit`] calls so far
    pub fn reinits(&self) -> usize {
        self.reinits
    }

    /// Reference coordinates of `p` in the active element
    pub fn reference_point(&self, p: &Point) -> Result<[f64; 3]> {
        let element_type = self.mesh.element(self.element).element_type;
        self.mapping
            .inverse_map(element_type, &self.coords, p, self.tolerance)
            .map_err(|source| TransferError::InverseMap {
                element: self.element,
                source,
            })
    }

    /// Interpolation weights of the active element's nodes at `p`
    pub fn weights(&self, p: &Point) -> Result<Vec<f64>> {
        let xi = self.reference_point(p)?;
        let element_type = self.mesh.element(self.element).element_type;
        Ok(self.mapping.shape_values(element_type, xi))
    }

    /// Interpolate one variable of a nodal field at `p`
    pub fn interpolate(&self, p: &Point, field: &FieldVector, variable: usize) -> Result<f64> {
        let weights = self.weights(p)?;
        Ok(self.combine(&weights, field, variable))
    }

    /// Sum of `weights[i] * field[node_i]` over the active element's nodes
    pub fn combine(&self, weights: &[f64], field: &FieldVector, variable: usize) -> f64 {
        self.mesh
            .element(self.element)
            .nodes
            .iter()
            .zip(weights)
            .map(|(&n, &w)| w * field.get(n, variable))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fem::mesh::{box_mesh_hexahedra, unit_cube};

    /// Maps every point to the reference centroid with equal weights
    struct CentroidMapping;

    impl ReferenceMapping for CentroidMapping {
        fn inverse_map(
            &self,
            element_type: ElementType,
            _coords: &[Point],
            _p: &Point,
            _tolerance: f64,
        ) -> std::result::Result<[f64; 3], MapError> {
            Ok(element_type.reference_centroid())
        }

        fn shape_values(&self, element_type: ElementType, _xi: [f64; 3]) -> Vec<f64> {
            let n = element_type.num_nodes();
            vec![1.0 / n as f64; n]
        }
    }

    struct FailingMapping;

    impl ReferenceMapping for FailingMapping {
        fn inverse_map(
            &self,
            _element_type: ElementType,
            _coords: &[Point],
            _p: &Point,
            _tolerance: f64,
        ) -> std::result::Result<[f64; 3], MapError> {
            Err(MapError::NotConverged {
                iterations: 25,
                update: 1.0,
            })
        }

        fn shape_values(&self, element_type: ElementType, _xi: [f64; 3]) -> Vec<f64> {
            vec![0.0; element_type.num_nodes()]
        }
    }

    #[test]
    fn test_linear_field_interpolated_exactly() {
        let mesh = box_mesh_hexahedra(ElementType::Hex8, [0.0; 3], [2.0, 1.0, 1.0], [2, 1, 1]);
        let f = |p: &Point| 3.0 * p.x - p.y + 0.5 * p.z + 1.0;
        let field = FieldVector::from_fn("u", mesh.num_nodes(), |n| f(mesh.node(n)));

        let mapping = LagrangeMapping;
        let mut projector = Projector::new(&mesh, &mapping, 1e-12).unwrap();
        projector.reinit(1);
        let p = Point::new(1.3, 0.2, 0.9);
        let value = projector.interpolate(&p, &field, 0).unwrap();
        assert!((value - f(&p)).abs() < 1e-12);

        let weights = projector.weights(&p).unwrap();
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-14);
        assert_eq!(projector.reinits(), 1);
    }

    #[test]
    fn test_shape_value_matches_shape_values() {
        let mapping = LagrangeMapping;
        let xi = [0.1, 0.2, 0.3];
        let all = mapping.shape_values(ElementType::Tet10, xi);
        for (i, v) in all.iter().enumerate() {
            assert_eq!(mapping.shape_value(ElementType::Tet10, i, xi), *v);
        }
    }

    #[test]
    fn test_stub_mapping_averages_nodes() {
        let mesh = unit_cube(ElementType::Hex8, 1);
        let field = FieldVector::from_fn("u", mesh.num_nodes(), |n| n as f64);
        let projector = Projector::new(&mesh, &CentroidMapping, 1e-10).unwrap();
        let value = projector.interpolate(&Point::new(0.9, 0.1, 0.4), &field, 0).unwrap();
        assert!((value - 3.5).abs() < 1e-14);
        assert_eq!(projector.element(), 0);
    }

    #[test]
    fn test_inverse_map_failure_names_element() {
        let mesh = unit_cube(ElementType::Hex8, 2);
        let mut projector = Projector::new(&mesh, &FailingMapping, 1e-10).unwrap();
        projector.reinit(5);
        let err = projector.weights(&Point::new(0.5, 0.5, 0.5)).unwrap_err();
        assert!(matches!(err, TransferError::InverseMap { element: 5, .. }));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let mesh = Mesh::new();
        assert!(matches!(
            Projector::new(&mesh, &LagrangeMapping, 1e-10),
            Err(TransferError::EmptyMesh)
        ));
    }
}
