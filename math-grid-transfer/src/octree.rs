//! Octree spatial index over mesh elements
//!
//! Bins live in an arena and refer to their children by index. A bin is
//! either a leaf holding element indices or an internal bin with exactly
//! eight children that tile its box along the centre planes. Elements are
//! assigned to every child whose box their (padded) bounding box touches,
//! so an element straddling a split plane appears in several leaves.

use crate::error::{Result, TransferError};
use fem::Mesh;
use fem::mesh::{BoundingBox, Point};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Octree build and query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Leaf capacity; a bin holding more elements is split
    pub max_elements_per_bin: usize,
    /// No bin is split below this depth (root has depth 0)
    pub max_depth: usize,
    /// No bin is split once its diagonal is below this fraction of the
    /// smallest element box it holds
    pub min_bin_element_ratio: f64,
    /// Element boxes are inflated by this fraction of their diagonal
    pub box_padding: f64,
    /// Reference-space tolerance of the precise containment test
    pub contains_tolerance: f64,
    /// A remembered element answers a cached lookup only for points at
    /// least this far inside it, in reference coordinates
    pub interior_margin: f64,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_elements_per_bin: 100,
            max_depth: 12,
            min_bin_element_ratio: 0.5,
            box_padding: 0.05,
            contains_tolerance: 1e-6,
            interior_margin: 1e-3,
        }
    }
}

impl OctreeConfig {
    /// Config with a given leaf capacity and default safeguards
    pub fn with_max_elements_per_bin(max_elements_per_bin: usize) -> Self {
        Self {
            max_elements_per_bin,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_elements_per_bin == 0 {
            return Err(TransferError::InvalidConfig(
                "max_elements_per_bin must be at least 1".into(),
            ));
        }
        if !(self.box_padding >= 0.0
            && self.contains_tolerance >= 0.0
            && self.min_bin_element_ratio >= 0.0)
        {
            return Err(TransferError::InvalidConfig(
                "box_padding, contains_tolerance and min_bin_element_ratio must be non-negative"
                    .into(),
            ));
        }
        if !(self.interior_margin > self.contains_tolerance) {
            return Err(TransferError::InvalidConfig(format!(
                "interior_margin ({}) must exceed contains_tolerance ({})",
                self.interior_margin, self.contains_tolerance
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum BinKind {
    Leaf(Vec<usize>),
    Internal([usize; 8]),
}

#[derive(Debug, Clone)]
struct Bin {
    bbox: BoundingBox,
    depth: usize,
    kind: BinKind,
}

/// Octree over the elements of a mesh, immutable after [`OctTree::build`]
#[derive(Debug, Clone)]
pub struct OctTree<'a> {
    mesh: &'a Mesh,
    bins: Vec<Bin>,
    element_boxes: Vec<BoundingBox>,
    config: OctreeConfig,
    /// Bins that stayed leaves over capacity because a safeguard fired
    n_capped_bins: usize,
}

impl<'a> OctTree<'a> {
    /// Build the tree in a single pass over the mesh elements.
    pub fn build(mesh: &'a Mesh, config: OctreeConfig) -> Result<Self> {
        config.validate()?;
        if mesh.num_elements() == 0 {
            return Err(TransferError::EmptyMesh);
        }
        mesh.validate()?;
        let start = Instant::now();

        let element_boxes: Vec<BoundingBox> = (0..mesh.num_elements())
            .map(|e| {
                let bbox = mesh.element_bounding_box(e);
                bbox.inflate(config.box_padding * bbox.diagonal())
            })
            .collect();

        let root_box = element_boxes[1..]
            .iter()
            .fold(element_boxes[0], |acc, b| acc.union(b));

        let mut tree = Self {
            mesh,
            bins: vec![Bin {
                bbox: root_box,
                depth: 0,
                kind: BinKind::Leaf((0..mesh.num_elements()).collect()),
            }],
            element_boxes,
            config,
            n_capped_bins: 0,
        };

        let mut pending = vec![0];
        while let Some(idx) = pending.pop() {
            if let Some(children) = tree.split(idx) {
                pending.extend(children);
            }
        }

        if tree.n_capped_bins > 0 {
            log::warn!(
                "octree: {} bin(s) left over capacity ({} elements) by the depth/size safeguard",
                tree.n_capped_bins,
                tree.config.max_elements_per_bin
            );
        }
        log::info!(
            "Built octree over {} elements: {} bins, {} active, depth {} in {:.2?}",
            mesh.num_elements(),
            tree.n_bins(),
            tree.n_active_bins(),
            tree.depth(),
            start.elapsed()
        );
        Ok(tree)
    }

    /// Split bin `idx` into octants if it is over capacity and no safeguard
    /// applies. Returns the new child indices.
    fn split(&mut self, idx: usize) -> Option<[usize; 8]> {
        let bin = &self.bins[idx];
        let elements = match &bin.kind {
            BinKind::Leaf(elements) if elements.len() > self.config.max_elements_per_bin => {
                elements
            }
            _ => return None,
        };
        let smallest = elements
            .iter()
            .map(|&e| self.element_boxes[e].diagonal())
            .fold(f64::INFINITY, f64::min);
        if bin.depth >= self.config.max_depth
            || bin.bbox.diagonal() < self.config.min_bin_element_ratio * smallest
        {
            self.n_capped_bins += 1;
            return None;
        }

        let octants = bin.bbox.octants();
        let assigned: Vec<Vec<usize>> = octants
            .iter()
            .map(|octant| {
                elements
                    .iter()
                    .copied()
                    .filter(|&e| self.element_boxes[e].intersects(octant))
                    .collect()
            })
            .collect();

        // Every element touches every octant: splitting cannot make progress
        if assigned.iter().all(|a| a.len() == elements.len()) {
            self.n_capped_bins += 1;
            return None;
        }

        let depth = bin.depth + 1;
        let first = self.bins.len();
        for (bbox, elements) in octants.into_iter().zip(assigned) {
            self.bins.push(Bin {
                bbox,
                depth,
                kind: BinKind::Leaf(elements),
            });
        }
        let children = std::array::from_fn(|i| first + i);
        self.bins[idx].kind = BinKind::Internal(children);
        Some(children)
    }

    /// Index of the first element containing `p`, or `None`.
    ///
    /// Children are visited in octant order and leaf elements in insertion
    /// order, so a point on a face shared by several elements always
    /// resolves to the same one.
    pub fn find_element(&self, p: &Point) -> Option<usize> {
        if !self.bins[0].bbox.contains(p, 0.0) {
            return None;
        }

        let mut stack = vec![0];
        while let Some(idx) = stack.pop() {
            match &self.bins[idx].kind {
                BinKind::Leaf(elements) => {
                    if let Some(e) = elements.iter().copied().find(|&e| self.contains(e, p)) {
                        return Some(e);
                    }
                }
                BinKind::Internal(children) => {
                    // Reverse so the lowest octant is popped first
                    stack.extend(
                        children
                            .iter()
                            .rev()
                            .copied()
                            .filter(|&c| self.bins[c].bbox.contains(p, 0.0)),
                    );
                }
            }
        }
        None
    }

    /// Precise containment test of element `e` against `p`
    #[inline]
    pub fn contains(&self, e: usize, p: &Point) -> bool {
        self.element_boxes[e].contains(p, 0.0)
            && self.mesh.contains_point(e, p, self.config.contains_tolerance)
    }

    /// Whether `p` lies inside element `e` clear of its faces, so that no
    /// neighbour can accept it and [`find_element`](Self::find_element)
    /// would return `e` as well
    #[inline]
    pub fn contains_interior(&self, e: usize, p: &Point) -> bool {
        self.element_boxes[e].contains(p, 0.0)
            && self
                .mesh
                .contains_point_interior(e, p, self.config.interior_margin)
    }

    /// Number of leaf bins holding at least one element
    pub fn n_active_bins(&self) -> usize {
        self.bins
            .iter()
            .filter(|b| matches!(&b.kind, BinKind::Leaf(e) if !e.is_empty()))
            .count()
    }

    /// Total number of bins, internal ones included
    pub fn n_bins(&self) -> usize {
        self.bins.len()
    }

    /// Depth of the deepest bin
    pub fn depth(&self) -> usize {
        self.bins.iter().map(|b| b.depth).max().unwrap_or(0)
    }

    /// Sum of leaf sizes; exceeds the element count when elements straddle
    /// split planes
    pub fn n_entries(&self) -> usize {
        self.leaves().map(|(_, elements)| elements.len()).sum()
    }

    /// Box enclosing every element
    pub fn bounding_box(&self) -> BoundingBox {
        self.bins[0].bbox
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Leaf boxes with their element lists
    pub fn leaves(&self) -> impl Iterator<Item = (&BoundingBox, &[usize])> {
        self.bins.iter().filter_map(|b| match &b.kind {
            BinKind::Leaf(elements) => Some((&b.bbox, elements.as_slice())),
            BinKind::Internal(_) => None,
        })
    }

    /// Locate every element centroid and every node of the mesh.
    ///
    /// Fails with the first point the tree cannot resolve; returns the
    /// number of points checked.
    pub fn check_coverage(&self) -> Result<usize> {
        let start = Instant::now();
        let mut points: Vec<Point> = (0..self.mesh.num_elements())
            .map(|e| self.mesh.element_centroid(e))
            .collect();
        points.extend(self.mesh.nodes.iter().copied());

        if let Some(point) = self.first_unresolved(&points) {
            return Err(TransferError::PointNotFound { point });
        }
        log::info!(
            "Located {} centroids and nodes in {:.2?}",
            points.len(),
            start.elapsed()
        );
        Ok(points.len())
    }

    #[cfg(feature = "parallel")]
    fn first_unresolved(&self, points: &[Point]) -> Option<Point> {
        use rayon::prelude::*;
        points
            .par_iter()
            .find_first(|p| self.find_element(p).is_none())
            .copied()
    }

    #[cfg(not(feature = "parallel"))]
    fn first_unresolved(&self, points: &[Point]) -> Option<Point> {
        points.iter().find(|p| self.find_element(p).is_none()).copied()
    }
}
