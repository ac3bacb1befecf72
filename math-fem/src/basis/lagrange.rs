//! Lagrange basis functions for finite elements
//!
//! Provides P1, P2 (tetrahedron) and Q1, Q2 (tensor-product hexahedron)
//! basis functions and their reference gradients.

/// Reference coordinates of the hexahedral nodes on [-1,1]^3.
///
/// Vertices 0-7 (bottom face counter-clockwise, then top face), edge
/// midpoints 8-19, face centres 20-25, cell centre 26. The first eight
/// entries are the Q1 nodes.
pub const HEX_REFERENCE_NODES: [[i8; 3]; 27] = [
    [-1, -1, -1],
    [1, -1, -1],
    [1, 1, -1],
    [-1, 1, -1],
    [-1, -1, 1],
    [1, -1, 1],
    [1, 1, 1],
    [-1, 1, 1],
    // Bottom edges
    [0, -1, -1],
    [1, 0, -1],
    [0, 1, -1],
    [-1, 0, -1],
    // Vertical edges
    [-1, -1, 0],
    [1, -1, 0],
    [1, 1, 0],
    [-1, 1, 0],
    // Top edges
    [0, -1, 1],
    [1, 0, 1],
    [0, 1, 1],
    [-1, 0, 1],
    // Faces: bottom, front, right, back, left, top
    [0, 0, -1],
    [0, -1, 0],
    [1, 0, 0],
    [0, 1, 0],
    [-1, 0, 0],
    [0, 0, 1],
    // Centre
    [0, 0, 0],
];

/// Vertex pairs of the P2 tetrahedron edge nodes 4-9
pub const TET_EDGE_VERTICES: [(usize, usize); 6] = [(0, 1), (1, 2), (2, 0), (0, 3), (1, 3), (2, 3)];

/// 1D Lagrange polynomial of `degree` (1 or 2) on [-1,1] attached to the
/// node at `node` (one of -1, 0, 1). Returns `(value, derivative)`.
#[inline]
fn lagrange_1d(degree: usize, node: i8, x: f64) -> (f64, f64) {
    match (degree, node) {
        (1, -1) => (0.5 * (1.0 - x), -0.5),
        (1, 1) => (0.5 * (1.0 + x), 0.5),
        (2, -1) => (0.5 * x * (x - 1.0), x - 0.5),
        (2, 0) => (1.0 - x * x, -2.0 * x),
        (2, 1) => (0.5 * x * (x + 1.0), x + 0.5),
        _ => unreachable!("no 1D Lagrange node {} for degree {}", node, degree),
    }
}

/// Evaluate Q1 (degree 1) or Q2 (degree 2) hexahedron basis functions and
/// their reference gradients at (xi, eta, zeta)
pub fn qn_hexahedron(degree: usize, xi: f64, eta: f64, zeta: f64) -> (Vec<f64>, Vec<[f64; 3]>) {
    let n = (degree + 1).pow(3);
    let mut values = Vec::with_capacity(n);
    let mut gradients = Vec::with_capacity(n);

    for node in &HEX_REFERENCE_NODES[..n] {
        let (lx, dx) = lagrange_1d(degree, node[0], xi);
        let (ly, dy) = lagrange_1d(degree, node[1], eta);
        let (lz, dz) = lagrange_1d(degree, node[2], zeta);
        values.push(lx * ly * lz);
        gradients.push([dx * ly * lz, lx * dy * lz, lx * ly * dz]);
    }

    (values, gradients)
}

/// Evaluate P1 tetrahedron basis functions at (xi, eta, zeta)
/// Reference tet: (0,0,0), (1,0,0), (0,1,0), (0,0,1)
pub fn p1_tetrahedron(xi: f64, eta: f64, zeta: f64) -> [f64; 4] {
    [1.0 - xi - eta - zeta, xi, eta, zeta]
}

/// Evaluate P1 tetrahedron basis function gradients (constant)
pub fn p1_tetrahedron_grad() -> [[f64; 3]; 4] {
    [
        [-1.0, -1.0, -1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

/// Evaluate P2 tetrahedron basis functions at (xi, eta, zeta)
/// Nodes: 4 vertices + 6 edge midpoints (see [`TET_EDGE_VERTICES`])
pub fn p2_tetrahedron(xi: f64, eta: f64, zeta: f64) -> [f64; 10] {
    let l = p1_tetrahedron(xi, eta, zeta);
    let mut n = [0.0; 10];
    for (i, &li) in l.iter().enumerate() {
        n[i] = li * (2.0 * li - 1.0);
    }
    for (e, &(a, b)) in TET_EDGE_VERTICES.iter().enumerate() {
        n[4 + e] = 4.0 * l[a] * l[b];
    }
    n
}

/// Evaluate P2 tetrahedron basis function gradients at (xi, eta, zeta)
pub fn p2_tetrahedron_grad(xi: f64, eta: f64, zeta: f64) -> [[f64; 3]; 10] {
    let l = p1_tetrahedron(xi, eta, zeta);
    let dl = p1_tetrahedron_grad();
    let mut g = [[0.0; 3]; 10];

    // d/dx [l(2l-1)] = (4l - 1) dl
    for i in 0..4 {
        for k in 0..3 {
            g[i][k] = (4.0 * l[i] - 1.0) * dl[i][k];
        }
    }
    // d/dx [4 la lb] = 4 (lb dla + la dlb)
    for (e, &(a, b)) in TET_EDGE_VERTICES.iter().enumerate() {
        for k in 0..3 {
            g[4 + e][k] = 4.0 * (l[b] * dl[a][k] + l[a] * dl[b][k]);
        }
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q1_hex_partition_of_unity() {
        let (n, g) = qn_hexahedron(1, 0.2, -0.4, 0.6);
        assert_eq!(n.len(), 8);
        let sum: f64 = n.iter().sum();
        assert!((sum - 1.0).abs() < 1e-14);
        for k in 0..3 {
            let gsum: f64 = g.iter().map(|gi| gi[k]).sum();
            assert!(gsum.abs() < 1e-14);
        }
    }

    #[test]
    fn test_q2_hex_kronecker() {
        for (i, node) in HEX_REFERENCE_NODES.iter().enumerate() {
            let (n, _) = qn_hexahedron(2, node[0] as f64, node[1] as f64, node[2] as f64);
            for (j, &nj) in n.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((nj - expected).abs() < 1e-14, "N{}(x{}) = {}", j, i, nj);
            }
        }
    }

    #[test]
    fn test_q2_hex_gradient_matches_finite_difference() {
        let (x, y, z) = (0.3, -0.2, 0.7);
        let h = 1e-6;
        let (_, g) = qn_hexahedron(2, x, y, z);
        let (np, _) = qn_hexahedron(2, x, y + h, z);
        let (nm, _) = qn_hexahedron(2, x, y - h, z);
        for i in 0..27 {
            let fd = (np[i] - nm[i]) / (2.0 * h);
            assert!((g[i][1] - fd).abs() < 1e-8);
        }
    }

    #[test]
    fn test_p1_tet_partition_of_unity() {
        let n = p1_tetrahedron(0.1, 0.2, 0.3);
        let sum: f64 = n.iter().sum();
        assert!((sum - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_p2_tet_kronecker() {
        let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let mut nodes: Vec<[f64; 3]> = vertices.to_vec();
        for &(a, b) in &TET_EDGE_VERTICES {
            nodes.push([
                0.5 * (vertices[a][0] + vertices[b][0]),
                0.5 * (vertices[a][1] + vertices[b][1]),
                0.5 * (vertices[a][2] + vertices[b][2]),
            ]);
        }
        for (i, p) in nodes.iter().enumerate() {
            let n = p2_tetrahedron(p[0], p[1], p[2]);
            for (j, &nj) in n.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((nj - expected).abs() < 1e-14);
            }
        }
    }

    #[test]
    fn test_p2_tet_gradients_sum_to_zero() {
        let g = p2_tetrahedron_grad(0.15, 0.25, 0.35);
        for k in 0..3 {
            let s: f64 = g.iter().map(|gi| gi[k]).sum();
            assert!(s.abs() < 1e-13);
        }
    }
}
