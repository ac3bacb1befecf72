//! Mesh generators for box-shaped domains
//!
//! Structured hexahedral (linear or quadratic) and tetrahedral meshes of
//! an axis-aligned box.

use super::types::{ElementType, Mesh, Point};
use crate::basis::HEX_REFERENCE_NODES;

/// Generate a box mesh with hexahedral elements
///
/// `element_type` must be `Hex8` or `Hex27`; quadratic elements share their
/// edge, face and centre nodes through a refined node lattice.
///
/// # Panics
/// Panics if `element_type` is not a hexahedron.
pub fn box_mesh_hexahedra(
    element_type: ElementType,
    min: [f64; 3],
    max: [f64; 3],
    divisions: [usize; 3],
) -> Mesh {
    assert!(
        matches!(element_type, ElementType::Hex8 | ElementType::Hex27),
        "box_mesh_hexahedra needs a hexahedral element type, got {:?}",
        element_type
    );
    let [nx, ny, nz] = divisions;
    let s = element_type.degree();

    // Node lattice with `s` intervals per element along each axis
    let (lx, ly, lz) = (s * nx + 1, s * ny + 1, s * nz + 1);
    let mut mesh = Mesh::new();
    for k in 0..lz {
        for j in 0..ly {
            for i in 0..lx {
                mesh.add_node(Point::new(
                    min[0] + (max[0] - min[0]) * i as f64 / (lx - 1) as f64,
                    min[1] + (max[1] - min[1]) * j as f64 / (ly - 1) as f64,
                    min[2] + (max[2] - min[2]) * k as f64 / (lz - 1) as f64,
                ));
            }
        }
    }

    let node_idx = |i: usize, j: usize, k: usize| -> usize { k * ly * lx + j * lx + i };
    // Reference coordinate -1/0/+1 to lattice offset within the element
    let offset = |r: i8| -> usize { ((r as i64 + 1) as usize * s) / 2 };

    for ek in 0..nz {
        for ej in 0..ny {
            for ei in 0..nx {
                let nodes = HEX_REFERENCE_NODES[..element_type.num_nodes()]
                    .iter()
                    .map(|r| {
                        node_idx(
                            s * ei + offset(r[0]),
                            s * ej + offset(r[1]),
                            s * ek + offset(r[2]),
                        )
                    })
                    .collect();
                mesh.add_element(element_type, nodes);
            }
        }
    }

    mesh
}

/// Generate a box mesh with linear tetrahedral elements
pub fn box_mesh_tetrahedra(min: [f64; 3], max: [f64; 3], divisions: [usize; 3]) -> Mesh {
    let [nx, ny, nz] = divisions;
    let mut mesh = Mesh::new();

    let dx = (max[0] - min[0]) / nx as f64;
    let dy = (max[1] - min[1]) / ny as f64;
    let dz = (max[2] - min[2]) / nz as f64;

    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                mesh.add_node(Point::new(
                    min[0] + i as f64 * dx,
                    min[1] + j as f64 * dy,
                    min[2] + k as f64 * dz,
                ));
            }
        }
    }

    let node_idx =
        |i: usize, j: usize, k: usize| -> usize { k * (ny + 1) * (nx + 1) + j * (nx + 1) + i };

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let n000 = node_idx(i, j, k);
                let n100 = node_idx(i + 1, j, k);
                let n010 = node_idx(i, j + 1, k);
                let n110 = node_idx(i + 1, j + 1, k);
                let n001 = node_idx(i, j, k + 1);
                let n101 = node_idx(i + 1, j, k + 1);
                let n011 = node_idx(i, j + 1, k + 1);
                let n111 = node_idx(i + 1, j + 1, k + 1);

                // Kuhn triangulation: 6 tetrahedra around the main diagonal
                mesh.add_element(ElementType::Tet4, vec![n000, n100, n110, n111]);
                mesh.add_element(ElementType::Tet4, vec![n000, n110, n010, n111]);
                mesh.add_element(ElementType::Tet4, vec![n000, n010, n011, n111]);
                mesh.add_element(ElementType::Tet4, vec![n000, n011, n001, n111]);
                mesh.add_element(ElementType::Tet4, vec![n000, n001, n101, n111]);
                mesh.add_element(ElementType::Tet4, vec![n000, n101, n100, n111]);
            }
        }
    }

    mesh
}

/// Unit cube [0,1]^3 with `n` elements per direction
pub fn unit_cube(element_type: ElementType, n: usize) -> Mesh {
    match element_type {
        ElementType::Tet4 => box_mesh_tetrahedra([0.0; 3], [1.0; 3], [n, n, n]),
        ElementType::Tet10 => {
            log::warn!("unit_cube: Tet10 generation not supported, using Tet4");
            box_mesh_tetrahedra([0.0; 3], [1.0; 3], [n, n, n])
        }
        ElementType::Hex8 | ElementType::Hex27 => {
            box_mesh_hexahedra(element_type, [0.0; 3], [1.0; 3], [n, n, n])
        }
    }
}
