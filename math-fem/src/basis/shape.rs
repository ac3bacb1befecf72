//! Shape function evaluation for finite elements
//!
//! Provides a unified interface for evaluating basis functions and their
//! gradients at arbitrary points within reference elements.

use super::lagrange::*;
use crate::error::MapError;
use crate::mesh::{ElementType, Point};

/// Shape functions evaluated at a point
#[derive(Debug, Clone)]
pub struct ShapeValues {
    /// Basis function values [N_0, N_1, ..., N_n]
    pub values: Vec<f64>,
    /// Basis function gradients [[dN_0/dxi, dN_0/deta, dN_0/dzeta], ...]
    pub gradients: Vec<[f64; 3]>,
}

/// Evaluate shape functions for an element at a reference point
pub fn evaluate_shape(element_type: ElementType, xi: f64, eta: f64, zeta: f64) -> ShapeValues {
    match element_type {
        ElementType::Tet4 => ShapeValues {
            values: p1_tetrahedron(xi, eta, zeta).to_vec(),
            gradients: p1_tetrahedron_grad().to_vec(),
        },
        ElementType::Tet10 => ShapeValues {
            values: p2_tetrahedron(xi, eta, zeta).to_vec(),
            gradients: p2_tetrahedron_grad(xi, eta, zeta).to_vec(),
        },
        ElementType::Hex8 | ElementType::Hex27 => {
            let (values, gradients) = qn_hexahedron(element_type.degree(), xi, eta, zeta);
            ShapeValues { values, gradients }
        }
    }
}

impl ShapeValues {
    /// Physical point `sum_i N_i x_i` for the element nodes `coords`
    pub fn map(&self, coords: &[Point]) -> Point {
        self.values
            .iter()
            .zip(coords)
            .fold(Point::origin(), |acc, (&n, &x)| acc + x * n)
    }

    /// Jacobian of the reference-to-physical map for the element nodes `coords`
    pub fn jacobian(&self, coords: &[Point]) -> Result<Jacobian, MapError> {
        Jacobian::from_3d(&self.gradients, coords)
    }
}

/// Jacobian matrix for coordinate transformation
/// Maps reference element coordinates to physical coordinates
#[derive(Debug, Clone)]
pub struct Jacobian {
    /// [[dx/dxi, dx/deta, dx/dzeta], [dy/..], [dz/..]]
    pub matrix: [[f64; 3]; 3],
    /// Determinant of Jacobian
    pub det: f64,
    /// Inverse of Jacobian
    pub inverse: [[f64; 3]; 3],
}

impl Jacobian {
    /// Compute 3D Jacobian from shape function gradients and node coordinates
    pub fn from_3d(grad_ref: &[[f64; 3]], coords: &[Point]) -> Result<Self, MapError> {
        let mut j = [[0.0; 3]; 3];

        for (g, x) in grad_ref.iter().zip(coords) {
            for k in 0..3 {
                j[0][k] += g[k] * x.x;
                j[1][k] += g[k] * x.y;
                j[2][k] += g[k] * x.z;
            }
        }

        let det = j[0][0] * (j[1][1] * j[2][2] - j[1][2] * j[2][1])
            - j[0][1] * (j[1][0] * j[2][2] - j[1][2] * j[2][0])
            + j[0][2] * (j[1][0] * j[2][1] - j[1][1] * j[2][0]);

        let scale = j.iter().flatten().fold(0.0_f64, |m, v| m.max(v.abs()));
        if !det.is_finite() || det.abs() <= 1e-14 * scale.powi(3) {
            return Err(MapError::SingularJacobian { det });
        }

        let inv_det = 1.0 / det;
        let inverse = [
            [
                (j[1][1] * j[2][2] - j[1][2] * j[2][1]) * inv_det,
                (j[0][2] * j[2][1] - j[0][1] * j[2][2]) * inv_det,
                (j[0][1] * j[1][2] - j[0][2] * j[1][1]) * inv_det,
            ],
            [
                (j[1][2] * j[2][0] - j[1][0] * j[2][2]) * inv_det,
                (j[0][0] * j[2][2] - j[0][2] * j[2][0]) * inv_det,
                (j[0][2] * j[1][0] - j[0][0] * j[1][2]) * inv_det,
            ],
            [
                (j[1][0] * j[2][1] - j[1][1] * j[2][0]) * inv_det,
                (j[0][1] * j[2][0] - j[0][0] * j[2][1]) * inv_det,
                (j[0][0] * j[1][1] - j[0][1] * j[1][0]) * inv_det,
            ],
        ];

        Ok(Self {
            matrix: j,
            det,
            inverse,
        })
    }

    /// Apply J^{-1} to a physical-space vector
    pub fn solve(&self, r: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (i, row) in self.inverse.iter().enumerate() {
            out[i] = row[0] * r[0] + row[1] * r[1] + row[2] * r[2];
        }
        out
    }
}
