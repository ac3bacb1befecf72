//! JSON mesh, solution and nodal output files
//!
//! - mesh: the serde form of [`Mesh`] (`nodes` and `elements`)
//! - solution: `{ "variables": [...], "values": [...] }` with node-major values
//! - nodal output: `{ "variables": [...], "nodes": [[x, y, z], ...], "values": [...] }`

use crate::error::{Result, TransferError};
use crate::field::FieldVector;
use fem::Mesh;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk form of a solution vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionFile {
    pub variables: Vec<String>,
    pub values: Vec<f64>,
}

/// On-disk form of a nodal field for visualisation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodalData {
    pub variables: Vec<String>,
    pub nodes: Vec<[f64; 3]>,
    pub values: Vec<f64>,
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| TransferError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| TransferError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and validate a mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let mesh: Mesh = serde_json::from_str(&read_to_string(path)?)?;
    mesh.validate()?;
    log::debug!("Read mesh {}: {}", path.display(), mesh.summary());
    Ok(mesh)
}

pub fn write_mesh<P: AsRef<Path>>(path: P, mesh: &Mesh) -> Result<()> {
    write_json(path.as_ref(), mesh)
}

/// Read a solution vector defined on a mesh with `n_nodes` nodes
pub fn read_solution<P: AsRef<Path>>(path: P, n_nodes: usize) -> Result<FieldVector> {
    let path = path.as_ref();
    let file: SolutionFile = serde_json::from_str(&read_to_string(path)?)?;
    FieldVector::from_flat(file.variables, n_nodes, file.values)
}

pub fn write_solution<P: AsRef<Path>>(path: P, field: &FieldVector) -> Result<()> {
    let file = SolutionFile {
        variables: field.variables().to_vec(),
        values: field.to_flat(),
    };
    write_json(path.as_ref(), &file)
}

/// Write a nodal field together with the node coordinates of its mesh
pub fn write_nodal_data<P: AsRef<Path>>(path: P, mesh: &Mesh, field: &FieldVector) -> Result<()> {
    if field.n_nodes() != mesh.num_nodes() {
        return Err(TransferError::FieldSize {
            expected: mesh.num_nodes() * field.n_variables(),
            actual: field.n_nodes() * field.n_variables(),
            nodes: mesh.num_nodes(),
            variables: field.n_variables(),
        });
    }
    let data = NodalData {
        variables: field.variables().to_vec(),
        nodes: mesh.nodes.iter().map(|p| p.to_array()).collect(),
        values: field.to_flat(),
    };
    write_json(path.as_ref(), &data)
}

pub fn read_nodal_data<P: AsRef<Path>>(path: P) -> Result<NodalData> {
    Ok(serde_json::from_str(&read_to_string(path.as_ref())?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fem::ElementType;
    use fem::mesh::unit_cube;

    #[test]
    fn test_mesh_and_solution_files() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = unit_cube(ElementType::Hex27, 1);
        write_mesh(dir.path().join("m.json"), &mesh).unwrap();
        let back = read_mesh(dir.path().join("m.json")).unwrap();
        assert_eq!(back, mesh);

        let field = FieldVector::from_fn("T", mesh.num_nodes(), |n| n as f64 * 0.5);
        write_solution(dir.path().join("s.json"), &field).unwrap();
        let back = read_solution(dir.path().join("s.json"), mesh.num_nodes()).unwrap();
        assert_eq!(back, field);
        assert!(matches!(
            read_solution(dir.path().join("s.json"), 8),
            Err(TransferError::FieldSize { .. })
        ));
    }

    #[test]
    fn test_solution_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, r#"{"variables": ["u", "v"], "values": [1, 2, 3, 4]}"#).unwrap();
        let field = read_solution(&path, 2).unwrap();
        assert_eq!(field.get(1, 0), 3.0);
        assert_eq!(field.get(0, 1), 2.0);
    }

    #[test]
    fn test_invalid_mesh_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"nodes": [{"x": 0, "y": 0, "z": 0}], "elements": [{"element_type": "Tet4", "nodes": [0, 1, 2, 3]}]}"#,
        )
        .unwrap();
        assert!(matches!(read_mesh(&path), Err(TransferError::InvalidMesh(_))));
        assert!(matches!(
            read_mesh(dir.path().join("missing.json")),
            Err(TransferError::Io { .. })
        ));
    }

    #[test]
    fn test_nodal_data() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = unit_cube(ElementType::Hex8, 1);
        let field = FieldVector::from_fn("u", mesh.num_nodes(), |n| -(n as f64));
        write_nodal_data(dir.path().join("d.json"), &mesh, &field).unwrap();
        let data = read_nodal_data(dir.path().join("d.json")).unwrap();
        assert_eq!(data.variables, vec!["u".to_string()]);
        assert_eq!(data.nodes.len(), 8);
        assert_eq!(data.nodes[7], [1.0, 1.0, 1.0]);
        assert_eq!(data.values[7], -7.0);
    }
}
