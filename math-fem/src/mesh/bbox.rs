//! Axis-aligned bounding boxes

use super::types::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned box given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Create a box from its corners. Corners are sorted componentwise.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Smallest box holding all points `pts`, or `None` for an empty slice
    pub fn from_points(pts: &[Point]) -> Option<Self> {
        let (first, rest) = pts.split_first()?;
        let mut bbox = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            bbox.extend(p);
        }
        Some(bbox)
    }

    /// Grow the box to hold `p`
    pub fn extend(&mut self, p: &Point) {
        self.min = Point::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    /// Smallest box holding both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        out.extend(&other.min);
        out.extend(&other.max);
        out
    }

    /// Box grown by `pad` in every direction
    pub fn inflate(&self, pad: f64) -> BoundingBox {
        let d = Point::new(pad, pad, pad);
        BoundingBox {
            min: self.min - d,
            max: self.max + d,
        }
    }

    pub fn extent(&self) -> [f64; 3] {
        (self.max - self.min).to_array()
    }

    /// Length of the main diagonal
    pub fn diagonal(&self) -> f64 {
        self.min.distance(&self.max)
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(&self.max)
    }

    /// Whether `p` is inside the box or on its boundary, with `tol` slack
    pub fn contains(&self, p: &Point, tol: f64) -> bool {
        p.x >= self.min.x - tol
            && p.x <= self.max.x + tol
            && p.y >= self.min.y - tol
            && p.y <= self.max.y + tol
            && p.z >= self.min.z - tol
            && p.z <= self.max.z + tol
    }

    /// Whether two boxes overlap (touching counts as overlapping)
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        // Boxes don't overlap if separated along any axis
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }

    /// The eight octants obtained by splitting at the box centre.
    ///
    /// Octant `i` takes the upper half along x when bit 0 of `i` is set,
    /// along y for bit 1 and along z for bit 2. The octants tile the box
    /// without gaps since they share the split planes exactly.
    pub fn octants(&self) -> [BoundingBox; 8] {
        let c = self.center();
        std::array::from_fn(|i| {
            let (x0, x1) = if i & 1 == 0 { (self.min.x, c.x) } else { (c.x, self.max.x) };
            let (y0, y1) = if i & 2 == 0 { (self.min.y, c.y) } else { (c.y, self.max.y) };
            let (z0, z1) = if i & 4 == 0 { (self.min.z, c.z) } else { (c.z, self.max.z) };
            BoundingBox {
                min: Point::new(x0, y0, z0),
                max: Point::new(x1, y1, z1),
            }
        })
    }
}
