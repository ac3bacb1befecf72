//! Cached point location
//!
//! A [`PointLocator`] is one lookup session over an [`OctTree`]. It
//! remembers the last element that contained a query point and tests it
//! first, falling back to a full tree descent on a miss. Consecutive
//! quadrature points of one element mostly hit the remembered element.
//!
//! The remembered element only answers for points clear of its faces
//! (see [`OctreeConfig::interior_margin`](crate::octree::OctreeConfig)).
//! Points on or near a shared face go to the tree, so a locator always
//! returns what [`OctTree::find_element`] returns.

use crate::error::{Result, TransferError};
use crate::octree::OctTree;
use fem::mesh::Point;

/// Counters of one locator session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocatorStats {
    /// Queries answered by the remembered element
    pub hits: usize,
    /// Queries that needed a tree descent
    pub misses: usize,
}

impl LocatorStats {
    pub fn queries(&self) -> usize {
        self.hits + self.misses
    }

    /// Fraction of queries answered from the cache
    pub fn hit_rate(&self) -> f64 {
        if self.queries() == 0 {
            0.0
        } else {
            self.hits as f64 / self.queries() as f64
        }
    }
}

/// Point lookup session with a single-slot element cache
#[derive(Debug)]
pub struct PointLocator<'t, 'a> {
    tree: &'t OctTree<'a>,
    current: Option<usize>,
    stats: LocatorStats,
}

impl<'t, 'a> PointLocator<'t, 'a> {
    pub fn new(tree: &'t OctTree<'a>) -> Self {
        Self {
            tree,
            current: None,
            stats: LocatorStats::default(),
        }
    }

    /// Element containing `p`, the same one [`OctTree::find_element`]
    /// returns
    pub fn locate(&mut self, p: &Point) -> Result<usize> {
        if let Some(e) = self.current.filter(|&e| self.tree.contains_interior(e, p)) {
            self.stats.hits += 1;
            return Ok(e);
        }

        self.stats.misses += 1;
        let e = self
            .tree
            .find_element(p)
            .ok_or(TransferError::PointNotFound { point: *p })?;
        self.current = Some(e);
        Ok(e)
    }

    /// The remembered element, if any
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn stats(&self) -> LocatorStats {
        self.stats
    }

    /// Forget the remembered element and clear the counters
    pub fn reset(&mut self) {
        self.current = None;
        self.stats = LocatorStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::octree::OctreeConfig;
    use fem::ElementType;
    use fem::mesh::unit_cube;

    #[test]
    fn test_hits_after_first_lookup() {
        let mesh = unit_cube(ElementType::Hex8, 4);
        let tree = OctTree::build(&mesh, OctreeConfig::with_max_elements_per_bin(6)).unwrap();
        let mut locator = PointLocator::new(&tree);
        assert_eq!(locator.current(), None);

        let a = locator.locate(&Point::new(0.1, 0.1, 0.1)).unwrap();
        let b = locator.locate(&Point::new(0.2, 0.15, 0.05)).unwrap();
        assert_eq!(a, b);
        assert_eq!(locator.stats(), LocatorStats { hits: 1, misses: 1 });

        let c = locator.locate(&Point::new(0.9, 0.9, 0.9)).unwrap();
        assert_ne!(a, c);
        assert_eq!(locator.current(), Some(c));
        assert_eq!(locator.stats().misses, 2);
    }

    #[test]
    fn test_matches_tree_for_interior_points() {
        let mesh = unit_cube(ElementType::Tet4, 3);
        let tree = OctTree::build(&mesh, OctreeConfig::with_max_elements_per_bin(10)).unwrap();
        let mut locator = PointLocator::new(&tree);
        for i in 0..20 {
            let t = (i as f64 + 0.37) / 20.0;
            let p = Point::new(t, (0.7 * t + 0.11) % 1.0, (0.3 + 0.5 * t) % 1.0);
            let cached = locator.locate(&p).unwrap();
            assert_eq!(Some(cached), tree.find_element(&p));
            // Warm cache gives the same answer again
            assert_eq!(locator.locate(&p).unwrap(), cached);
        }
        assert!(locator.stats().hits >= 20);
    }

    #[test]
    fn test_shared_face_after_warm_cache_matches_tree() {
        let mesh = unit_cube(ElementType::Hex8, 2);
        let tree = OctTree::build(&mesh, OctreeConfig::default()).unwrap();
        let mut locator = PointLocator::new(&tree);

        assert_eq!(locator.locate(&Point::new(0.75, 0.25, 0.25)).unwrap(), 1);
        let face = Point::new(0.5, 0.25, 0.25);
        let expected = tree.find_element(&face);
        assert_eq!(expected, Some(0));
        assert_eq!(Some(locator.locate(&face).unwrap()), expected);
        assert_eq!(locator.stats(), LocatorStats { hits: 0, misses: 2 });

        // Back in element 1 and then onto the shared corner of all eight
        locator.locate(&Point::new(0.75, 0.75, 0.75)).unwrap();
        let corner = Point::new(0.5, 0.5, 0.5);
        assert_eq!(Some(locator.locate(&corner).unwrap()), tree.find_element(&corner));
    }

    #[test]
    fn test_boundary_sweep_matches_tree() {
        let mesh = unit_cube(ElementType::Tet4, 2);
        let tree = OctTree::build(&mesh, OctreeConfig::with_max_elements_per_bin(4)).unwrap();
        let mut locator = PointLocator::new(&tree);
        // Lattice points all lie on element faces, edges or vertices
        for i in 0..=4 {
            for j in 0..=4 {
                for k in 0..=4 {
                    let p = Point::new(i as f64 / 4.0, j as f64 / 4.0, k as f64 / 4.0);
                    assert_eq!(Some(locator.locate(&p).unwrap()), tree.find_element(&p));
                }
            }
        }
    }

    #[test]
    fn test_not_found_leaves_cache() {
        let mesh = unit_cube(ElementType::Hex8, 2);
        let tree = OctTree::build(&mesh, OctreeConfig::default()).unwrap();
        let mut locator = PointLocator::new(&tree);
        let e = locator.locate(&Point::new(0.25, 0.25, 0.25)).unwrap();

        let err = locator.locate(&Point::new(1000.0, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, TransferError::PointNotFound { .. }));
        assert_eq!(locator.current(), Some(e));

        locator.reset();
        assert_eq!(locator.current(), None);
        assert_eq!(locator.stats().queries(), 0);
        assert_eq!(locator.stats().hit_rate(), 0.0);
    }
}
