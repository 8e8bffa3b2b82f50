//! Stair-stepped diagonal bands.
//!
//! A [`Staircase`] chamfers the lower-left corner of a rectangular ring: it
//! runs in from `+x` along `y = origin`, climbs diagonally in square steps,
//! and leaves towards `+y` along `x = origin`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Point, Polygon};

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum StaircaseError {
    #[error("staircase needs at least one step")]
    NoSteps,
    #[error("staircase thickness {thickness} must be positive and at most the step {step}")]
    BadThickness { thickness: i64, step: i64 },
}

/// A stair-stepped band of uniform thickness.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Staircase {
    /// Coordinate of the horizontal and vertical legs.
    pub origin: i64,
    /// Rise and run of each step.
    pub step: i64,
    /// Number of steps, counting both legs.
    pub steps: usize,
    /// Band thickness.
    pub thickness: i64,
    /// Coordinate at which both legs stop.
    pub end: i64,
}

impl Staircase {
    pub fn new(origin: i64, step: i64, steps: usize, thickness: i64, end: i64) -> Self {
        Self {
            origin,
            step,
            steps,
            thickness,
            end,
        }
    }

    /// The coordinate at which the legs actually stop.
    ///
    /// Legs always reach at least one thickness past the last step.
    pub fn effective_end(&self) -> i64 {
        let n = self.steps as i64;
        self.end
            .max(self.origin + (n - 1) * self.step + self.thickness)
    }

    /// The lower-left boundary, from the end of the horizontal leg to the end of the vertical leg.
    fn centerline(&self) -> Vec<Point> {
        let (s, w, n) = (self.origin, self.step, self.steps as i64);
        let e = self.effective_end();

        let mut pts = Vec::with_capacity(2 * self.steps + 1);
        pts.push(Point::new(e, s));
        for m in 1..n {
            let x = s + (n - m) * w;
            pts.push(Point::new(x, s + (m - 1) * w));
            pts.push(Point::new(x, s + m * w));
        }
        pts.push(Point::new(s, s + (n - 1) * w));
        pts.push(Point::new(s, e));
        pts
    }

    /// Returns the outline of the band as a single normalized polygon.
    pub fn polygon(&self) -> Result<Polygon, StaircaseError> {
        if self.steps == 0 {
            return Err(StaircaseError::NoSteps);
        }
        if self.thickness <= 0 || self.thickness > self.step {
            return Err(StaircaseError::BadThickness {
                thickness: self.thickness,
                step: self.step,
            });
        }

        let t = self.thickness;
        let lower = self.centerline();
        let last = lower.len() - 1;

        let mut points = lower.clone();
        points.push(lower[last].translated(Point::new(t, 0)));
        points.extend(
            lower[1..last]
                .iter()
                .rev()
                .map(|p| p.translated(Point::new(t, t))),
        );
        points.push(lower[0].translated(Point::new(0, t)));

        Ok(Polygon::from_verts(points).normalized())
    }
}
