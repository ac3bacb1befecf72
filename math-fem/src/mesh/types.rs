//! Mesh types for 3D finite element analysis
//!
//! Supports linear and quadratic tetrahedral and hexahedral elements.

use crate::error::MeshError;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// Create a 3D point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin
    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (*self - *other).norm()
    }

    /// Length of the position vector
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &Point) -> Point {
        (*self + *other) * 0.5
    }

    /// Coordinates as an array
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point {
    fn from(p: [f64; 3]) -> Self {
        Point::new(p[0], p[1], p[2])
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from(p: (f64, f64, f64)) -> Self {
        Point::new(p.0, p.1, p.2)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// Linear tetrahedron (4 vertices)
    Tet4,
    /// Quadratic tetrahedron (4 vertices + 6 edge midpoints)
    Tet10,
    /// Trilinear hexahedron (8 vertices)
    Hex8,
    /// Triquadratic hexahedron (8 vertices + 12 edge + 6 face + 1 centre)
    Hex27,
}

impl ElementType {
    /// Number of nodes carried by this element type
    pub fn num_nodes(&self) -> usize {
        match self {
            ElementType::Tet4 => 4,
            ElementType::Tet10 => 10,
            ElementType::Hex8 => 8,
            ElementType::Hex27 => 27,
        }
    }

    /// Number of vertices (corners)
    pub fn num_vertices(&self) -> usize {
        match self {
            ElementType::Tet4 | ElementType::Tet10 => 4,
            ElementType::Hex8 | ElementType::Hex27 => 8,
        }
    }

    /// Polynomial degree of the nodal Lagrange basis
    pub fn degree(&self) -> usize {
        match self {
            ElementType::Tet4 | ElementType::Hex8 => 1,
            ElementType::Tet10 | ElementType::Hex27 => 2,
        }
    }

    pub fn is_tetrahedron(&self) -> bool {
        matches!(self, ElementType::Tet4 | ElementType::Tet10)
    }

    /// Centroid of the reference element
    pub fn reference_centroid(&self) -> [f64; 3] {
        if self.is_tetrahedron() {
            [0.25, 0.25, 0.25]
        } else {
            [0.0, 0.0, 0.0]
        }
    }
}

/// A finite element with node indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element type
    pub element_type: ElementType,
    /// Node indices (vertices first, then edge, face and interior nodes)
    pub nodes: Vec<usize>,
}

impl Element {
    /// Create a new element
    pub fn new(element_type: ElementType, nodes: Vec<usize>) -> Self {
        Self {
            element_type,
            nodes,
        }
    }

    /// Get vertex nodes (first N nodes are always vertices)
    pub fn vertices(&self) -> &[usize] {
        &self.nodes[..self.element_type.num_vertices()]
    }

    /// Global index of local node `i`
    #[inline]
    pub fn node(&self, i: usize) -> usize {
        self.nodes[i]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// A finite element mesh
///
/// Nodes and elements are kept in insertion order; element and node
/// indices are positions in these vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Node coordinates
    pub nodes: Vec<Point>,
    /// Elements
    pub elements: Vec<Element>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its index
    pub fn add_node(&mut self, point: Point) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(point);
        idx
    }

    /// Add an element and return its index
    pub fn add_element(&mut self, element_type: ElementType, nodes: Vec<usize>) -> usize {
        let idx = self.elements.len();
        self.elements.push(Element::new(element_type, nodes));
        idx
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Get node coordinates
    pub fn node(&self, idx: usize) -> &Point {
        &self.nodes[idx]
    }

    /// Get element
    pub fn element(&self, idx: usize) -> &Element {
        &self.elements[idx]
    }

    /// Check that every element has the node count of its type and only
    /// references existing nodes.
    pub fn validate(&self) -> Result<(), MeshError> {
        let n_nodes = self.nodes.len();
        for (idx, elem) in self.elements.iter().enumerate() {
            let expected = elem.element_type.num_nodes();
            if elem.nodes.len() != expected {
                return Err(MeshError::NodeCount {
                    element: idx,
                    element_type: elem.element_type,
                    expected,
                    actual: elem.nodes.len(),
                });
            }
            if let Some(&node) = elem.nodes.iter().find(|&&n| n >= n_nodes) {
                return Err(MeshError::NodeIndex {
                    element: idx,
                    node,
                    num_nodes: n_nodes,
                });
            }
        }
        Ok(())
    }

    /// Apply a coordinate transformation to every node
    pub fn map_nodes<F>(&mut self, f: F)
    where
        F: Fn(&Point) -> Point,
    {
        for p in &mut self.nodes {
            *p = f(p);
        }
    }

    /// One-line summary of node and element counts
    pub fn summary(&self) -> String {
        let mut counts: Vec<(ElementType, usize)> = Vec::new();
        for elem in &self.elements {
            match counts.iter_mut().find(|(t, _)| *t == elem.element_type) {
                Some((_, c)) => *c += 1,
                None => counts.push((elem.element_type, 1)),
            }
        }
        let types: Vec<String> = counts
            .iter()
            .map(|(t, c)| format!("{:?}={}", t, c))
            .collect();
        format!(
            "n_nodes()={} n_elem()={} [{}]",
            self.num_nodes(),
            self.num_elements(),
            types.join(", ")
        )
    }
}
