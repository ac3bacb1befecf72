//! Gauss-Legendre quadrature points and weights
//!
//! 1D rules of any size are computed on the fly; hexahedral rules are tensor
//! products and tetrahedral rules are collapsed (Duffy) products of them.

use std::f64::consts::PI;

/// A single quadrature point with weight
#[derive(Debug, Clone, Copy)]
pub struct QuadraturePoint {
    /// Reference coordinates (xi, eta, zeta)
    pub coords: [f64; 3],
    /// Integration weight
    pub weight: f64,
}

impl QuadraturePoint {
    pub fn new_1d(xi: f64, weight: f64) -> Self {
        Self {
            coords: [xi, 0.0, 0.0],
            weight,
        }
    }

    pub fn new_3d(xi: f64, eta: f64, zeta: f64, weight: f64) -> Self {
        Self {
            coords: [xi, eta, zeta],
            weight,
        }
    }

    #[inline]
    pub fn xi(&self) -> f64 {
        self.coords[0]
    }

    #[inline]
    pub fn eta(&self) -> f64 {
        self.coords[1]
    }

    #[inline]
    pub fn zeta(&self) -> f64 {
        self.coords[2]
    }
}

/// 1D Gauss-Legendre quadrature on [-1, 1] with `n_points` points, in
/// ascending order. Exact for polynomials of degree `2 * n_points - 1`.
pub fn gauss_legendre_1d(n_points: usize) -> Vec<QuadraturePoint> {
    let n = n_points.max(1);
    let mut xs = vec![0.0; n];
    let mut ws = vec![0.0; n];

    for i in 0..n.div_ceil(2) {
        // Tricomi initial guess for the i-th root, refined by Newton on P_n
        let mut z = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        let mut dp = 1.0;
        for _ in 0..100 {
            let (p, d) = legendre_with_derivative(n, z);
            dp = d;
            let dz = p / d;
            z -= dz;
            if dz.abs() < 1e-16 {
                break;
            }
        }
        let (_, d) = legendre_with_derivative(n, z);
        if d.is_finite() {
            dp = d;
        }
        let w = 2.0 / ((1.0 - z * z) * dp * dp);
        xs[i] = -z;
        xs[n - 1 - i] = z;
        ws[i] = w;
        ws[n - 1 - i] = w;
    }

    xs.into_iter()
        .zip(ws)
        .map(|(x, w)| QuadraturePoint::new_1d(x, w))
        .collect()
}

/// Legendre polynomial P_n(z) and its derivative, by the three-term recurrence
fn legendre_with_derivative(n: usize, z: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = z;
    for j in 2..=n {
        let jf = j as f64;
        let p2 = ((2.0 * jf - 1.0) * z * p1 - (jf - 1.0) * p0) / jf;
        p0 = p1;
        p1 = p2;
    }
    let p_n = if n == 0 { 1.0 } else { p1 };
    let p_nm1 = if n == 0 { 0.0 } else { p0 };
    let d = n as f64 * (z * p_n - p_nm1) / (z * z - 1.0);
    (p_n, d)
}

/// Gauss quadrature for hexahedra
/// Reference hex: [-1,1] x [-1,1] x [-1,1]
pub fn gauss_hexahedron(n_points: usize) -> Vec<QuadraturePoint> {
    let pts_1d = gauss_legendre_1d(n_points);
    let mut result = Vec::with_capacity(pts_1d.len().pow(3));

    for pk in &pts_1d {
        for pj in &pts_1d {
            for pi in &pts_1d {
                result.push(QuadraturePoint::new_3d(
                    pi.xi(),
                    pj.xi(),
                    pk.xi(),
                    pi.weight * pj.weight * pk.weight,
                ));
            }
        }
    }

    result
}

/// Collapsed Gauss quadrature for tetrahedra
/// Reference tet: (0,0,0), (1,0,0), (0,1,0), (0,0,1)
///
/// The unit cube (u, v, w) is mapped onto the tetrahedron by
/// xi = u, eta = v (1 - u), zeta = w (1 - u)(1 - v), whose Jacobian
/// (1 - u)^2 (1 - v) is folded into the weights.
pub fn gauss_tetrahedron(n_points: usize) -> Vec<QuadraturePoint> {
    let pts_1d: Vec<(f64, f64)> = gauss_legendre_1d(n_points)
        .iter()
        .map(|p| (0.5 * (p.xi() + 1.0), 0.5 * p.weight))
        .collect();
    let mut result = Vec::with_capacity(pts_1d.len().pow(3));

    for &(u, wu) in &pts_1d {
        for &(v, wv) in &pts_1d {
            for &(w, ww) in &pts_1d {
                let xi = u;
                let eta = v * (1.0 - u);
                let zeta = w * (1.0 - u) * (1.0 - v);
                let jac = (1.0 - u) * (1.0 - u) * (1.0 - v);
                result.push(QuadraturePoint::new_3d(xi, eta, zeta, wu * wv * ww * jac));
            }
        }
    }

    result
}
