//! Integer layout geometry for parametric cell generators.

use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use array_map::Indexable;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use transform::{Transform, Transformation, Translate};

use self::bbox::{Bbox, BoundBox};

pub mod bbox;
pub mod orientation;
pub mod ring;
pub mod staircase;
pub mod tile;
pub mod transform;

/// Snaps `pos` to the nearest multiple of `grid`.
///
/// Ties are rounded towards negative infinity.
pub fn snap_to_grid(pos: i64, grid: i64) -> i64 {
    assert!(grid > 0);

    let rem = pos.rem_euclid(grid);
    if rem <= grid / 2 {
        pos - rem
    } else {
        pos + grid - rem
    }
}

/// Returns `true` if `pos` lies on a multiple of `grid`.
#[inline]
pub fn is_on_grid(pos: i64, grid: i64) -> bool {
    pos.rem_euclid(grid) == 0
}

/// A point in two-dimensional layout-space.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    /// Creates a new [`Point`] from (x,y) coordinates.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Creates a new point from the given direction and coordinates.
    ///
    /// If `dir` is [`Dir::Horiz`], `a` becomes the x-coordinate and `b` becomes the y-coordinate.
    /// If `dir` is [`Dir::Vert`], `a` becomes the y-coordinate and `b` becomes the x-coordinate.
    pub fn from_dir_coords(dir: Dir, a: i64, b: i64) -> Self {
        match dir {
            Dir::Horiz => Self::new(a, b),
            Dir::Vert => Self::new(b, a),
        }
    }

    /// Returns the origin, (0, 0).
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Creates a new [`Point`] shifted by `p`.
    #[inline]
    pub fn translated(&self, p: Point) -> Self {
        let mut pt = *self;
        pt.translate(p);
        pt
    }

    #[inline]
    pub fn snap_to_grid(&self, grid: i64) -> Self {
        Self::new(snap_to_grid(self.x, grid), snap_to_grid(self.y, grid))
    }

    #[inline]
    pub fn is_on_grid(&self, grid: i64) -> bool {
        is_on_grid(self.x, grid) && is_on_grid(self.y, grid)
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Self;
    fn add(self, rhs: Point) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign<Point> for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Self;
    fn sub(self, rhs: Point) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from(value: (i64, i64)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// A one-dimensional span.
#[derive(
    Debug, Default, Clone, Copy, Hash, Ord, PartialOrd, Serialize, Deserialize, PartialEq, Eq,
)]
pub struct Span {
    start: i64,
    stop: i64,
}

impl Span {
    /// Creates a new [`Span`] between two integers.
    pub fn new(start: i64, stop: i64) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }

    pub fn with_start_and_length(start: i64, length: i64) -> Self {
        Self {
            stop: start + length,
            start,
        }
    }

    pub fn with_stop_and_length(stop: i64, length: i64) -> Self {
        Self {
            start: stop - length,
            stop,
        }
    }

    /// Creates a span with the given endpoint and length.
    ///
    /// If `sign` is [`Sign::Pos`], `point` is treated as the ending/stopping point of the span.
    /// If `sign` is [`Sign::Neg`], `point` is treated as the beginning/starting point of the span.
    pub fn with_point_and_length(sign: Sign, point: i64, length: i64) -> Self {
        match sign {
            Sign::Pos => Self::with_stop_and_length(point, length),
            Sign::Neg => Self::with_start_and_length(point, length),
        }
    }

    #[inline]
    pub fn center(&self) -> i64 {
        (self.start + self.stop) / 2
    }

    #[inline]
    pub fn length(&self) -> i64 {
        self.stop - self.start
    }

    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> i64 {
        self.stop
    }

    /// Returns the overlap of two spans, or [`None`] if they are disjoint.
    pub fn intersection(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let stop = self.stop.min(other.stop);
        if start <= stop {
            Some(Self { start, stop })
        } else {
            None
        }
    }

    /// Returns `true` if `other` lies entirely within this span.
    pub fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.stop <= self.stop
    }

    pub fn translate(self, amount: i64) -> Self {
        Self {
            start: self.start + amount,
            stop: self.stop + amount,
        }
    }
}

impl From<(i64, i64)> for Span {
    fn from(value: (i64, i64)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// An enumeration of axis-aligned directions.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum Dir {
    /// The horizontal, or x-aligned, direction.
    #[default]
    Horiz,
    /// The vertical, or y-aligned, direction.
    Vert,
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("error parsing direction `{original}`; expected horizontal or vertical")]
pub struct DirParseError {
    original: String,
}

impl FromStr for Dir {
    type Err = DirParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vertical" | "vert" | "v" => Ok(Self::Vert),
            "horizontal" | "horiz" | "h" => Ok(Self::Horiz),
            _ => Err(DirParseError {
                original: s.to_string(),
            }),
        }
    }
}

impl Dir {
    /// Returns the perpendicular direction.
    pub fn other(self) -> Self {
        match self {
            Self::Horiz => Self::Vert,
            Self::Vert => Self::Horiz,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Horiz => write!(f, "horizontal"),
            Self::Vert => write!(f, "vertical"),
        }
    }
}

impl std::ops::Not for Dir {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.other()
    }
}

/// Enumeration over possible signs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[repr(u8)]
#[derive(Indexable)]
pub enum Sign {
    /// Positive.
    Pos,
    /// Negative.
    Neg,
}

impl std::ops::Not for Sign {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Pos => Self::Neg,
            Self::Neg => Self::Pos,
        }
    }
}

/// An enumeration of the sides of a axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[repr(u8)]
#[derive(Indexable)]
pub enum Side {
    Top,
    Right,
    Bot,
    Left,
}

impl Side {
    /// All four sides, in clockwise order starting from the top.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bot, Side::Left];

    /// Gets the direction of the edge corresponding to this side.
    ///
    /// Top and bottom edges are **horizontal** line segments;
    /// left and right edges are **vertical** line segments.
    pub fn edge_dir(&self) -> Dir {
        match self {
            Side::Top | Side::Bot => Dir::Horiz,
            Side::Left | Side::Right => Dir::Vert,
        }
    }

    /// Returns the sign corresponding to moving towards this side.
    pub fn sign(&self) -> Sign {
        match self {
            Side::Top | Side::Right => Sign::Pos,
            Side::Bot | Side::Left => Sign::Neg,
        }
    }
}

/// A horizontal and vertical rectangular dimension with no specified location.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
pub struct Dims {
    w: i64,
    h: i64,
}

impl Dims {
    /// Creates a new [`Dims`] from a width and height.
    pub fn new(w: i64, h: i64) -> Self {
        Self { w, h }
    }

    /// Creates a new [`Dims`] with width and height equal to `value`.
    pub fn square(value: i64) -> Self {
        Self { w: value, h: value }
    }

    #[inline]
    pub fn w(&self) -> i64 {
        self.w
    }

    #[inline]
    pub fn h(&self) -> i64 {
        self.h
    }

    /// Returns the dimension along direction `dir`.
    pub fn dim(&self, dir: Dir) -> i64 {
        match dir {
            Dir::Horiz => self.w,
            Dir::Vert => self.h,
        }
    }
}

impl std::ops::Add<Dims> for Dims {
    type Output = Self;
    fn add(self, rhs: Dims) -> Self::Output {
        Self::new(self.w + rhs.w, self.h + rhs.h)
    }
}

/// A closed n-sided polygon with arbitrary number of vertices.
///
/// Closure from the last point back to the first is implied;
/// the initial point need not be repeated at the end.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn from_verts(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the polygon with repeated and collinear vertices removed.
    ///
    /// Runs until no vertex can be dropped, so chains of collinear
    /// vertices collapse to their two ends.
    pub fn normalized(&self) -> Self {
        let mut points = self.points.clone();
        loop {
            let n = points.len();
            if n < 3 {
                break;
            }
            let drop = (0..n).find(|&i| {
                let prev = points[(i + n - 1) % n];
                let curr = points[i];
                let next = points[(i + 1) % n];
                curr == prev || cross(prev, curr, next) == 0
            });
            match drop {
                Some(i) => {
                    points.remove(i);
                }
                None => break,
            }
        }
        Self { points }
    }

    /// Returns twice the signed area of the polygon.
    ///
    /// Positive for counter-clockwise vertex order.
    pub fn signed_area2(&self) -> i64 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let (a, b) = (self.points[i], self.points[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum()
    }

    /// Returns `true` if every corner of `rect` lies inside the polygon.
    ///
    /// Exact for convex polygons.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.corners().into_iter().all(|p| self.contains(p))
    }
}

impl Translate for Polygon {
    fn translate(&mut self, p: Point) {
        for pt in self.points.iter_mut() {
            pt.translate(p);
        }
    }
}

/// The z-component of `(b - a) x (c - b)`.
fn cross(a: Point, b: Point, c: Point) -> i64 {
    (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x)
}

/// An axis-aligned rectangle, specified by lower-left and upper-right corners.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rect {
    /// The lower-left corner.
    pub p0: Point,
    /// The upper-right corner.
    pub p1: Point,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(p0: Point, p1: Point) -> Self {
        Self {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }

    /// Creates a new rectangle from the coordinates of two opposite corners.
    pub fn from_coords(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Creates a rectangle from lower-left and upper-right coordinates.
    ///
    /// Returns [`None`] if the corners are inverted or the rectangle would be empty.
    pub fn checked_from_coords(x0: i64, y0: i64, x1: i64, y1: i64) -> Option<Self> {
        if x0 < x1 && y0 < y1 {
            Some(Self::from_coords(x0, y0, x1, y1))
        } else {
            None
        }
    }

    /// Creates a rectangle with lower-left corner `p0` and the given dimensions.
    pub fn with_dims_at(p0: Point, dims: Dims) -> Self {
        Self::new(p0, Point::new(p0.x + dims.w(), p0.y + dims.h()))
    }

    /// Creates a rectangle from horizontal and vertical [`Span`]s.
    pub fn from_spans(h: Span, v: Span) -> Self {
        Self {
            p0: Point::new(h.start(), v.start()),
            p1: Point::new(h.stop(), v.stop()),
        }
    }

    /// Returns the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2, (self.p0.y + self.p1.y) / 2)
    }

    #[inline]
    pub fn bottom(&self) -> i64 {
        self.p0.y
    }

    #[inline]
    pub fn top(&self) -> i64 {
        self.p1.y
    }

    #[inline]
    pub fn left(&self) -> i64 {
        self.p0.x
    }

    #[inline]
    pub fn right(&self) -> i64 {
        self.p1.x
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.p1.x - self.p0.x
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.p1.y - self.p0.y
    }

    /// Returns the area of the rectangle.
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Returns the horizontal span of the rectangle.
    pub fn hspan(&self) -> Span {
        Span::new(self.p0.x, self.p1.x)
    }

    /// Returns the vertical span of the rectangle.
    pub fn vspan(&self) -> Span {
        Span::new(self.p0.y, self.p1.y)
    }

    /// Returns the span of the rectangle along direction `dir`.
    pub fn span(&self, dir: Dir) -> Span {
        match dir {
            Dir::Horiz => self.hspan(),
            Dir::Vert => self.vspan(),
        }
    }

    /// Returns a [`Rect`] with the given `span` in the given `dir`, and the current span in the
    /// other direction.
    pub fn with_span(self, span: Span, dir: Dir) -> Self {
        match dir {
            Dir::Horiz => Self::from_spans(span, self.vspan()),
            Dir::Vert => Self::from_spans(self.hspan(), span),
        }
    }

    /// Returns the four corners in counter-clockwise order from the lower-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.p0,
            Point::new(self.p1.x, self.p0.y),
            self.p1,
            Point::new(self.p0.x, self.p1.y),
        ]
    }

    /// Returns `true` if the rectangles overlap with positive area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.p0.x < other.p1.x
            && other.p0.x < self.p1.x
            && self.p0.y < other.p1.y
            && other.p0.y < self.p1.y
    }

    /// Returns `true` if `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.hspan().contains(other.hspan()) && self.vspan().contains(other.vspan())
    }

    /// Returns `true` if the rectangle has zero width or height.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl Translate for Rect {
    fn translate(&mut self, p: Point) {
        self.p0.translate(p);
        self.p1.translate(p);
    }
}

impl From<Bbox> for Rect {
    fn from(value: Bbox) -> Self {
        Self {
            p0: value.p0,
            p1: value.p1,
        }
    }
}

/// The primary geometric primitive comprising raw layout.
///
/// Variants include [`Rect`], [`Polygon`], and [`Point`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[enum_dispatch(ShapeTrait)]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
    Point(Point),
}

impl Transform for Shape {
    fn transform(&self, trans: Transformation) -> Self {
        match self {
            Self::Rect(s) => Self::Rect(s.transform(trans)),
            Self::Polygon(s) => Self::Polygon(s.transform(trans)),
            Self::Point(s) => Self::Point(s.transform(trans)),
        }
    }
}

impl Translate for Shape {
    fn translate(&mut self, p: Point) {
        match self {
            Self::Rect(s) => s.translate(p),
            Self::Polygon(s) => s.translate(p),
            Self::Point(s) => s.translate(p),
        }
    }
}

impl Shape {
    pub fn as_rect(&self) -> Option<Rect> {
        if let Shape::Rect(rect) = self {
            Some(*rect)
        } else {
            None
        }
    }

    pub fn as_poly(&self) -> Option<&Polygon> {
        if let Shape::Polygon(poly) = self {
            Some(poly)
        } else {
            None
        }
    }
}

/// Common shape operations, dispatched from the [`Shape`] enum to its variants by [mod@enum_dispatch].
#[enum_dispatch]
pub trait ShapeTrait {
    /// Returns our "origin", an arbitrary [`Point`] on the shape.
    fn point0(&self) -> Point;
    /// Returns `true` if the shape contains [`Point`] `pt`.
    ///
    /// Containment is *inclusive*: points on the boundary are inside.
    fn contains(&self, pt: Point) -> bool;
    /// Converts the shape to a [`Polygon`], the most general of shapes.
    fn to_poly(&self) -> Polygon;
}

impl ShapeTrait for Rect {
    fn point0(&self) -> Point {
        self.p0
    }
    fn contains(&self, pt: Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }
    fn to_poly(&self) -> Polygon {
        Polygon {
            points: self.corners().to_vec(),
        }
    }
}

impl ShapeTrait for Polygon {
    fn point0(&self) -> Point {
        self.points[0]
    }
    fn contains(&self, pt: Point) -> bool {
        if !self.points.bbox().contains(pt) {
            return false;
        }

        // Winding number. Boundary hits return early.
        let mut winding_num: isize = 0;
        let n = self.points.len();
        for idx in 0..n {
            let (past, next) = (&self.points[idx], &self.points[(idx + 1) % n]);

            if past.y.min(next.y) <= pt.y && past.y.max(next.y) >= pt.y {
                if next.y == past.y {
                    if past.x.min(next.x) <= pt.x && past.x.max(next.x) >= pt.x {
                        return true;
                    }
                } else {
                    // Compare `xsolve` against `pt.x` without truncating division.
                    let num = (next.x - past.x) * (pt.y - past.y) + (past.x - pt.x) * (next.y - past.y);
                    let ord = if next.y > past.y {
                        num.cmp(&0)
                    } else {
                        0.cmp(&num)
                    };
                    match ord {
                        Ordering::Equal => return true,
                        Ordering::Greater => {
                            // Half-open in y so shared vertices count once.
                            let (lo, hi) = (past.y.min(next.y), past.y.max(next.y));
                            if pt.y >= lo && pt.y < hi {
                                if next.y > past.y {
                                    winding_num += 1;
                                } else {
                                    winding_num -= 1;
                                }
                            }
                        }
                        Ordering::Less => (),
                    }
                }
            }
        }
        winding_num != 0
    }
    fn to_poly(&self) -> Polygon {
        self.clone()
    }
}

impl ShapeTrait for Point {
    fn point0(&self) -> Point {
        *self
    }
    fn contains(&self, pt: Point) -> bool {
        pt == *self
    }
    fn to_poly(&self) -> Polygon {
        Polygon {
            points: vec![*self],
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::orientation::Named;

    #[test]
    fn transform_identity() {
        let shape1 = Shape::Rect(Rect::from_coords(0, 0, 1, 1));
        let shape2 = shape1.transform(Transformation::identity());
        assert_eq!(shape2, shape1);
    }

    #[test]
    fn transform_rotate() {
        let shape1 = Shape::Rect(Rect::from_coords(0, 0, 1, 1));
        let trans = Transformation::rotate(90.);
        let shape2 = shape1.transform(trans);
        assert_eq!(shape2, Shape::Rect(Rect::from_coords(-1, 0, 0, 1)));
        let shape3 = shape2.transform(trans);
        assert_eq!(shape3, Shape::Rect(Rect::from_coords(-1, -1, 0, 0)));
        let shape4 = shape3.transform(trans);
        assert_eq!(shape4, Shape::Rect(Rect::from_coords(0, -1, 1, 0)));
        let shape0 = shape4.transform(trans);
        assert_eq!(shape0, shape1);
    }

    #[test]
    fn rect_rotated_into_corner() {
        // A rect near the lower-left corner of a 100x60 box lands near each other corner.
        let r = Rect::from_coords(0, 0, 10, 2);
        let (l, w) = (100, 60);
        let at = |named: Named, x, y| {
            r.transform(Transformation::with_loc_and_orientation(
                Point::new(x, y),
                named,
            ))
        };
        assert_eq!(at(Named::R180, l, w), Rect::from_coords(90, 58, 100, 60));
        assert_eq!(at(Named::R90, l, 0), Rect::from_coords(98, 0, 100, 10));
        assert_eq!(at(Named::R270, 0, w), Rect::from_coords(0, 50, 2, 60));
    }

    #[test]
    fn test_polygon_contains() {
        let triangle = Polygon {
            points: vec![Point::new(0, 0), Point::new(2, 0), Point::new(0, 2)],
        };
        assert!(triangle.contains(Point::new(0, 0)));
        assert!(triangle.contains(Point::new(1, 0)));
        assert!(triangle.contains(Point::new(2, 0)));
        assert!(triangle.contains(Point::new(0, 1)));
        assert!(triangle.contains(Point::new(1, 1)));
        assert!(!triangle.contains(Point::new(2, 2)));
        assert!(!triangle.contains(Point::new(2, 1)));

        let u = Polygon {
            points: vec![
                Point::new(0, 0),
                Point::new(0, 10),
                Point::new(2, 10),
                Point::new(2, 2),
                Point::new(8, 2),
                Point::new(8, 10),
                Point::new(10, 10),
                Point::new(10, 0),
            ],
        };
        for pt in &u.points {
            assert!(u.contains(*pt));
        }
        assert!(u.contains(Point::new(1, 1)));
        assert!(u.contains(Point::new(1, 9)));
        assert!(u.contains(Point::new(9, 9)));
        assert!(u.contains(Point::new(9, 1)));
        assert!(!u.contains(Point::new(3, 3)));
        assert!(!u.contains(Point::new(3, 9)));
        assert!(!u.contains(Point::new(7, 3)));
        assert!(!u.contains(Point::new(7, 9)));
    }

    #[test]
    fn polygon_contains_rect_in_triangle() {
        let triangle = Polygon::from_verts(vec![
            Point::new(0, 0),
            Point::new(0, 16_800),
            Point::new(16_800, 0),
        ]);
        assert!(triangle.contains_rect(&Rect::from_coords(0, 0, 1_000, 1_000)));
        // Upper-right corner exactly on the hypotenuse still counts.
        assert!(triangle.contains_rect(&Rect::from_coords(7_400, 7_400, 8_400, 8_400)));
        assert!(!triangle.contains_rect(&Rect::from_coords(8_000, 8_000, 9_000, 9_000)));
    }

    #[test]
    fn polygon_normalized_drops_redundant_vertices() {
        let poly = Polygon::from_verts(vec![
            Point::new(0, 0),
            Point::new(5, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(10, 10),
            Point::new(0, 10),
        ]);
        let norm = poly.normalized();
        assert_eq!(
            norm.points,
            vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(10, 10),
                Point::new(0, 10)
            ]
        );
        assert_eq!(norm.signed_area2(), 200);
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(1, 5), 0);
        assert_eq!(snap_to_grid(3, 5), 5);
        assert_eq!(snap_to_grid(-3, 5), -5);
        assert_eq!(Point::new(999, 260).snap_to_grid(500), Point::new(1_000, 500));
        assert!(is_on_grid(150_000, 5));
        assert!(!is_on_grid(150_003, 5));
    }

    #[test]
    fn span_intersection() {
        let a = Span::new(0, 10);
        assert_eq!(a.intersection(Span::new(5, 20)), Some(Span::new(5, 10)));
        assert_eq!(a.intersection(Span::new(11, 20)), None);
        assert!(a.contains(Span::new(2, 8)));
        assert_eq!(Span::new(10, 0), a);
    }

    #[test]
    fn checked_rect_rejects_inverted_corners() {
        assert_eq!(
            Rect::checked_from_coords(0, 0, 10, 5),
            Some(Rect::from_coords(0, 0, 10, 5))
        );
        assert_eq!(Rect::checked_from_coords(10, 0, 0, 5), None);
        assert_eq!(Rect::checked_from_coords(0, 5, 10, 5), None);
    }
}
