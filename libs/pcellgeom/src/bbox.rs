//! Rectangular bounding boxes and associated trait implementations.

use serde::{Deserialize, Serialize};

use super::{Point, Polygon, Rect, Shape};

/// An axis-aligned rectangular bounding box.
///
/// Unlike [`Rect`], a [`Bbox`] may be empty, in which case `p0` lies to the
/// upper right of `p1`.
#[derive(Debug, Default, Copy, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Bbox {
    pub p0: Point,
    pub p1: Point,
}

impl Bbox {
    #[inline]
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.p1.x - self.p0.x
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.p1.y - self.p0.y
    }

    pub fn from_point(pt: Point) -> Self {
        Self { p0: pt, p1: pt }
    }

    /// Creates an empty, otherwise invalid bounding box.
    pub fn empty() -> Self {
        Self {
            p0: Point::new(i64::MAX, i64::MAX),
            p1: Point::new(i64::MIN, i64::MIN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }

    /// Returns true if [`Point`] `pt` lies inside the bounding box, boundary included.
    pub fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }

    /// Converts a bounding box into a [`Rect`], or [`None`] if it is empty.
    pub fn into_rect(self) -> Option<Rect> {
        if self.is_empty() {
            None
        } else {
            Some(Rect::from(self))
        }
    }

    /// Returns the smallest box enclosing both `self` and `other`.
    pub fn union(self, other: Bbox) -> Bbox {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        Bbox::new(
            Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        )
    }
}

impl From<Rect> for Bbox {
    fn from(r: Rect) -> Self {
        Self { p0: r.p0, p1: r.p1 }
    }
}

/// Objects with a rectangular bounding box.
pub trait BoundBox {
    fn bbox(&self) -> Bbox;

    /// Computes the bounding box as a [`Rect`], or [`None`] if it is empty.
    fn brect(&self) -> Option<Rect> {
        self.bbox().into_rect()
    }
}

impl<T> BoundBox for &T
where
    T: BoundBox,
{
    fn bbox(&self) -> Bbox {
        T::bbox(*self)
    }
}

impl BoundBox for Point {
    fn bbox(&self) -> Bbox {
        Bbox::from_point(*self)
    }
}

impl BoundBox for Rect {
    fn bbox(&self) -> Bbox {
        Bbox::from(*self)
    }
}

impl BoundBox for Polygon {
    fn bbox(&self) -> Bbox {
        self.points.bbox()
    }
}

impl BoundBox for Shape {
    fn bbox(&self) -> Bbox {
        match self {
            Shape::Rect(r) => r.bbox(),
            Shape::Polygon(p) => p.bbox(),
            Shape::Point(p) => p.bbox(),
        }
    }
}

impl<T> BoundBox for [T]
where
    T: BoundBox,
{
    fn bbox(&self) -> Bbox {
        self.iter()
            .fold(Bbox::empty(), |acc, item| acc.union(item.bbox()))
    }
}

impl<T> BoundBox for Vec<T>
where
    T: BoundBox,
{
    fn bbox(&self) -> Bbox {
        self.as_slice().bbox()
    }
}
