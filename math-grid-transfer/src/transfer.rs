//! Coarse-to-fine field transfer and error accumulation
//!
//! Both passes sweep the fine mesh element by element. Each sample point
//! is located in the coarse mesh through a fresh [`PointLocator`] session
//! and the coarse field is interpolated there by a [`Projector`] that is
//! re-initialised only when the located element changes.

use crate::config::TransferConfig;
use crate::error::{Result, TransferError};
use crate::field::FieldVector;
use crate::locator::{LocatorStats, PointLocator};
use crate::octree::OctTree;
use crate::projector::{LagrangeMapping, Projector, ReferenceMapping};
use fem::Mesh;
use fem::basis::evaluate_shape;
use fem::mesh::ElementType;
use fem::quadrature::QuadratureRule;
use std::collections::HashMap;
use std::time::Instant;

/// Outcome of an L2 error pass
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Name of the compared variable
    pub variable: String,
    /// Index of the compared variable
    pub variable_index: usize,
    /// sqrt of the integral of (coarse - fine)^2 over the fine mesh
    pub error: f64,
    /// Number of quadrature points evaluated
    pub n_quadrature_points: usize,
    /// Locator counters of the pass
    pub locator: LocatorStats,
}

/// Transfer of a field from a coarse mesh onto an overlapping fine mesh
pub struct GridTransfer<'a, M = LagrangeMapping> {
    coarse: &'a Mesh,
    fine: &'a Mesh,
    coarse_field: &'a FieldVector,
    fine_field: &'a FieldVector,
    tree: OctTree<'a>,
    mapping: M,
    config: TransferConfig,
}

impl<'a> GridTransfer<'a, LagrangeMapping> {
    /// Check the inputs and build the point location index over `coarse`.
    pub fn new(
        coarse: &'a Mesh,
        fine: &'a Mesh,
        coarse_field: &'a FieldVector,
        fine_field: &'a FieldVector,
        config: TransferConfig,
    ) -> Result<Self> {
        Self::with_mapping(coarse, fine, coarse_field, fine_field, config, LagrangeMapping)
    }
}

impl<'a, M: ReferenceMapping> GridTransfer<'a, M> {
    /// Same as [`GridTransfer::new`] with a custom reference mapping for
    /// the coarse interpolation
    pub fn with_mapping(
        coarse: &'a Mesh,
        fine: &'a Mesh,
        coarse_field: &'a FieldVector,
        fine_field: &'a FieldVector,
        config: TransferConfig,
        mapping: M,
    ) -> Result<Self> {
        config.validate()?;
        if !coarse_field.same_schema(fine_field) {
            return Err(TransferError::VariableMismatch {
                coarse: coarse_field.variables().to_vec(),
                fine: fine_field.variables().to_vec(),
            });
        }
        check_field_size(coarse, coarse_field)?;
        check_field_size(fine, fine_field)?;
        fine.validate()?;

        let tree = OctTree::build(coarse, config.octree.clone())?;
        Ok(Self {
            coarse,
            fine,
            coarse_field,
            fine_field,
            tree,
            mapping,
            config,
        })
    }

    /// Index over the coarse mesh
    pub fn tree(&self) -> &OctTree<'a> {
        &self.tree
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Variable names shared by both fields
    pub fn variables(&self) -> &[String] {
        self.fine_field.variables()
    }

    /// L2 norm over the fine mesh of the difference between the coarse
    /// field interpolated onto it and the fine field, for one variable.
    pub fn l2_error(&self, variable: usize) -> Result<ErrorReport> {
        let n_vars = self.fine_field.n_variables();
        if variable >= n_vars {
            return Err(TransferError::VariableIndex {
                index: variable,
                count: n_vars,
            });
        }
        let start = Instant::now();

        let mut locator = PointLocator::new(&self.tree);
        let mut projector = Projector::new(
            self.coarse,
            &self.mapping,
            self.config.inverse_map_tolerance,
        )?;
        let mut rules: HashMap<ElementType, QuadratureRule> = HashMap::new();

        let mut sum = 0.0;
        let mut n_points = 0;
        for (e, elem) in self.fine.elements.iter().enumerate() {
            let element_type = elem.element_type;
            let rule = rules
                .entry(element_type)
                .or_insert_with(|| QuadratureRule::new(element_type, self.config.quadrature_order));
            let coords = self.fine.element_points(e);

            for qp in rule.iter() {
                let shape = evaluate_shape(element_type, qp.xi(), qp.eta(), qp.zeta());
                let jac = shape
                    .jacobian(&coords)
                    .map_err(|source| TransferError::DegenerateElement { element: e, source })?;
                let xyz = shape.map(&coords);
                let fine_value: f64 = elem
                    .nodes
                    .iter()
                    .zip(&shape.values)
                    .map(|(&n, &w)| w * self.fine_field.get(n, variable))
                    .sum();

                let c = locator.locate(&xyz)?;
                if c != projector.element() {
                    projector.reinit(c);
                }
                let coarse_value = projector.interpolate(&xyz, self.coarse_field, variable)?;

                let diff = coarse_value - fine_value;
                sum += jac.det.abs() * qp.weight * diff * diff;
                n_points += 1;
            }
        }

        let report = ErrorReport {
            variable: self.fine_field.variables()[variable].clone(),
            variable_index: variable,
            error: sum.sqrt(),
            n_quadrature_points: n_points,
            locator: locator.stats(),
        };
        log::info!(
            "L2 error of '{}' over {} quadrature points: {:e} in {:.2?}",
            report.variable,
            n_points,
            report.error,
            start.elapsed()
        );
        log::debug!(
            "error pass locator: {} hits, {} misses ({:.1}% cached), {} projector reinits",
            report.locator.hits,
            report.locator.misses,
            100.0 * report.locator.hit_rate(),
            projector.reinits()
        );
        Ok(report)
    }

    /// [`GridTransfer::l2_error`] for a variable given by name
    pub fn l2_error_by_name(&self, name: &str) -> Result<ErrorReport> {
        let index = self
            .fine_field
            .variable_index(name)
            .ok_or_else(|| TransferError::UnknownVariable(name.to_string()))?;
        self.l2_error(index)
    }

    /// Coarse minus fine value of every variable at every fine mesh node
    /// used by an element. Nodes no element references are left at zero.
    pub fn nodal_difference(&self) -> Result<FieldVector> {
        let start = Instant::now();
        let n_vars = self.fine_field.n_variables();
        let mut difference =
            FieldVector::zeros(self.fine_field.variables().to_vec(), self.fine.num_nodes());

        let mut locator = PointLocator::new(&self.tree);
        let mut projector = Projector::new(
            self.coarse,
            &self.mapping,
            self.config.inverse_map_tolerance,
        )?;
        let mut visited = vec![false; self.fine.num_nodes()];
        let mut n_visited = 0;

        for elem in &self.fine.elements {
            for &n in &elem.nodes {
                if visited[n] {
                    continue;
                }
                visited[n] = true;
                n_visited += 1;

                let p = self.fine.node(n);
                let c = locator.locate(p)?;
                if c != projector.element() {
                    projector.reinit(c);
                }
                let weights = projector.weights(p)?;
                for v in 0..n_vars {
                    let coarse_value = projector.combine(&weights, self.coarse_field, v);
                    difference.set(n, v, coarse_value - self.fine_field.get(n, v));
                }
            }
        }

        let stats = locator.stats();
        log::info!(
            "Nodal difference of {} variable(s) at {} nodes in {:.2?}",
            n_vars,
            n_visited,
            start.elapsed()
        );
        log::debug!(
            "nodal pass locator: {} hits, {} misses, {} projector reinits",
            stats.hits,
            stats.misses,
            projector.reinits()
        );
        Ok(difference)
    }
}

fn check_field_size(mesh: &Mesh, field: &FieldVector) -> Result<()> {
    if field.n_nodes() != mesh.num_nodes() {
        let variables = field.n_variables();
        return Err(TransferError::FieldSize {
            expected: mesh.num_nodes() * variables,
            actual: field.n_nodes() * variables,
            nodes: mesh.num_nodes(),
            variables,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fem::mesh::{Point, unit_cube};

    fn constant(mesh: &Mesh, value: f64) -> FieldVector {
        FieldVector::from_fn("u", mesh.num_nodes(), |_| value)
    }

    #[test]
    fn test_same_mesh_gives_zero() {
        let mesh = unit_cube(ElementType::Hex8, 2);
        let field = FieldVector::from_fn("u", mesh.num_nodes(), |n| {
            let p = mesh.node(n);
            p.x + 2.0 * p.y * p.z
        });
        let transfer =
            GridTransfer::new(&mesh, &mesh, &field, &field, TransferConfig::default()).unwrap();
        let report = transfer.l2_error(0).unwrap();
        assert!(report.error < 1e-12);
        assert_eq!(report.n_quadrature_points, 8 * 27);
        assert!(report.locator.hits > report.locator.misses);

        let diff = transfer.nodal_difference().unwrap();
        assert!(diff.max_abs() < 1e-12);
    }

    #[test]
    fn test_constant_offset() {
        let coarse = unit_cube(ElementType::Hex8, 1);
        let fine = unit_cube(ElementType::Hex8, 2);
        let cf = constant(&coarse, 1.0);
        let ff = constant(&fine, 2.0);
        let transfer = GridTransfer::new(&coarse, &fine, &cf, &ff, TransferConfig::default()).unwrap();
        let report = transfer.l2_error(0).unwrap();
        assert!((report.error - 1.0).abs() < 1e-12);
        assert_eq!(report.variable, "u");
        let diff = transfer.nodal_difference().unwrap();
        for n in 0..fine.num_nodes() {
            assert!((diff.get(n, 0) + 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_variable_checks() {
        let mesh = unit_cube(ElementType::Hex8, 1);
        let u = constant(&mesh, 1.0);
        let p = FieldVector::from_fn("p", mesh.num_nodes(), |_| 1.0);
        assert!(matches!(
            GridTransfer::new(&mesh, &mesh, &u, &p, TransferConfig::default()),
            Err(TransferError::VariableMismatch { .. })
        ));

        let transfer = GridTransfer::new(&mesh, &mesh, &u, &u, TransferConfig::default()).unwrap();
        assert!(matches!(
            transfer.l2_error(1),
            Err(TransferError::VariableIndex { index: 1, count: 1 })
        ));
        assert!(transfer.l2_error_by_name("u").is_ok());
        assert!(matches!(
            transfer.l2_error_by_name("T"),
            Err(TransferError::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_field_size_checked() {
        let coarse = unit_cube(ElementType::Hex8, 1);
        let fine = unit_cube(ElementType::Hex8, 2);
        let wrong = constant(&coarse, 1.0);
        assert!(matches!(
            GridTransfer::new(&coarse, &fine, &wrong, &wrong, TransferConfig::default()),
            Err(TransferError::FieldSize { nodes: 27, .. })
        ));
    }

    #[test]
    fn test_fine_point_outside_coarse_is_fatal() {
        let coarse = unit_cube(ElementType::Hex8, 1);
        let mut fine = unit_cube(ElementType::Hex8, 1);
        fine.map_nodes(|p| Point::new(p.x + 5.0, p.y, p.z));
        let cf = constant(&coarse, 1.0);
        let ff = constant(&fine, 1.0);
        let transfer = GridTransfer::new(&coarse, &fine, &cf, &ff, TransferConfig::default()).unwrap();
        assert!(matches!(
            transfer.l2_error(0),
            Err(TransferError::PointNotFound { .. })
        ));
        assert!(matches!(
            transfer.nodal_difference(),
            Err(TransferError::PointNotFound { .. })
        ));
    }
}
