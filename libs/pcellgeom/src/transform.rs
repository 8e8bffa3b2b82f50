//! Affine placement of points and shapes.

use serde::{Deserialize, Serialize};

use super::orientation::{wrap_angle, Orientation};
use super::{Point, Polygon, Rect};

/// A 2x2 rotation-matrix and two-entry translation vector.
///
/// Transformed coordinates are rounded back to the integer grid,
/// so right-angle rotations and mirrors are exact.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Transformation {
    /// The transformation matrix represented in row-major order.
    pub a: [[f64; 2]; 2],
    /// The x-y translation applied after the transformation.
    pub b: [f64; 2],
}

impl Transformation {
    pub fn identity() -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [0., 0.],
        }
    }

    /// Returns a translation by `(x,y)`.
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            a: [[1., 0.], [0., 1.]],
            b: [x, y],
        }
    }

    /// Returns a counter-clockwise rotation by `angle` degrees.
    pub fn rotate(angle: f64) -> Self {
        Self::builder().angle(angle).build()
    }

    /// Returns a reflection about the x-axis.
    pub fn reflect_vert() -> Self {
        Self {
            a: [[1., 0.], [0., -1.]],
            b: [0., 0.],
        }
    }

    #[inline]
    pub fn builder() -> TransformationBuilder {
        TransformationBuilder::default()
    }

    /// Creates a transform that applies `orientation` about the origin, then moves the origin to `loc`.
    pub fn with_loc_and_orientation(loc: Point, orientation: impl Into<Orientation>) -> Self {
        Self::builder()
            .point(loc)
            .orientation(orientation.into())
            .build()
    }

    /// Composes `parent` with `child`, so that `child` is applied first.
    ///
    /// Not commutative: reflecting then translating by (1,1) lands local point (1,1)
    /// at (2,-2), while the reverse order lands it at (2,0).
    pub fn cascade(parent: Transformation, child: Transformation) -> Transformation {
        let mut b = matvec(&parent.a, &child.b);
        b[0] += parent.b[0];
        b[1] += parent.b[1];
        let a = matmul(&parent.a, &child.a);
        Self { a, b }
    }

    /// The translation component, rounded to the grid.
    pub fn offset_point(&self) -> Point {
        Point {
            x: self.b[0].round() as i64,
            y: self.b[1].round() as i64,
        }
    }

    /// Recovers the orientation encoded in the matrix, with the angle rounded to whole degrees.
    pub fn orientation(&self) -> Orientation {
        let det = self.a[0][0] * self.a[1][1] - self.a[0][1] * self.a[1][0];
        let reflect_vert = det < 0.;
        let angle = self.a[1][0].atan2(self.a[0][0]).to_degrees().round();
        Orientation {
            reflect_vert,
            angle: wrap_angle(angle),
        }
    }
}

impl<T> From<T> for Transformation
where
    T: Into<Orientation>,
{
    fn from(value: T) -> Self {
        Self::builder().orientation(value).build()
    }
}

/// A builder for creating transformations from translations and [`Orientation`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationBuilder {
    x: f64,
    y: f64,
    reflect_vert: bool,
    angle: f64,
}

impl TransformationBuilder {
    pub fn point(&mut self, point: impl Into<Point>) -> &mut Self {
        let point = point.into();
        self.x = point.x as f64;
        self.y = point.y as f64;
        self
    }

    pub fn orientation(&mut self, o: impl Into<Orientation>) -> &mut Self {
        let o = o.into();
        self.reflect_vert = o.reflect_vert;
        self.angle = o.angle;
        self
    }

    pub fn angle(&mut self, angle: f64) -> &mut Self {
        self.angle = angle;
        self
    }

    pub fn reflect_vert(&mut self, reflect_vert: bool) -> &mut Self {
        self.reflect_vert = reflect_vert;
        self
    }

    /// Builds a [`Transformation`]: reflect about the x-axis (if requested), then rotate, then translate.
    pub fn build(&mut self) -> Transformation {
        let b = [self.x, self.y];
        let (sin, cos) = exact_sin_cos(self.angle);
        let sin_refl = if self.reflect_vert { sin } else { -sin };
        let cos_refl = if self.reflect_vert { -cos } else { cos };
        let a = [[cos, sin_refl], [sin, cos_refl]];
        Transformation { a, b }
    }
}

/// Sine and cosine of `angle` degrees, exact at multiples of 90.
fn exact_sin_cos(angle: f64) -> (f64, f64) {
    let angle = wrap_angle(angle);
    if angle == 0. {
        (0., 1.)
    } else if angle == 90. {
        (1., 0.)
    } else if angle == 180. {
        (0., -1.)
    } else if angle == 270. {
        (-1., 0.)
    } else {
        let rad = angle.to_radians();
        (rad.sin(), rad.cos())
    }
}

/// Multiples two 2x2 matrices, returning a new 2x2 matrix
fn matmul(a: &[[f64; 2]; 2], b: &[[f64; 2]; 2]) -> [[f64; 2]; 2] {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

fn matvec(a: &[[f64; 2]; 2], b: &[f64; 2]) -> [f64; 2] {
    [
        a[0][0] * b[0] + a[0][1] * b[1],
        a[1][0] * b[0] + a[1][1] * b[1],
    ]
}

/// A trait for specifying how an object is changed by a transformation.
pub trait Transform {
    /// Creates a new object at a location equal to the transformation of our own.
    fn transform(&self, trans: Transformation) -> Self;
}

impl Transform for Point {
    fn transform(&self, trans: Transformation) -> Self {
        let xf = self.x as f64;
        let yf = self.y as f64;
        let x = trans.a[0][0] * xf + trans.a[0][1] * yf + trans.b[0];
        let y = trans.a[1][0] * xf + trans.a[1][1] * yf + trans.b[1];
        Self {
            x: x.round() as i64,
            y: y.round() as i64,
        }
    }
}

impl Transform for Rect {
    fn transform(&self, trans: Transformation) -> Self {
        Rect::new(self.p0.transform(trans), self.p1.transform(trans))
    }
}

impl Transform for Polygon {
    /// Mirroring transforms flip the winding; vertex order is kept as-is.
    fn transform(&self, trans: Transformation) -> Self {
        Polygon {
            points: self.points.iter().map(|p| p.transform(trans)).collect(),
        }
    }
}

/// A trait for specifying how a shape is translated by a [`Point`].
pub trait Translate {
    /// Translates the shape by a [`Point`] through mutation.
    fn translate(&mut self, p: Point);

    /// Consumes and translates the shape, returning the new shape.
    fn translated_owned(mut self, p: Point) -> Self
    where
        Self: Sized,
    {
        self.translate(p);
        self
    }
}

impl Translate for Point {
    fn translate(&mut self, p: Point) {
        self.x += p.x;
        self.y += p.y;
    }
}
