//! Seal ring dimensions in layout units.

use pcellgeom::orientation::Named;
use pcellgeom::ring::{Ring, RingError};
use pcellgeom::staircase::Staircase;
use pcellgeom::{Dir, Point, Rect, Side, Span};

use crate::tech::SealRingTech;

/// Placement of the seal ring, derived from the user parameters and the
/// technology constants. All values are in nanometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SealRingGeometry {
    /// Cell length along x.
    pub l: i64,
    /// Cell width along y.
    pub w: i64,
    pub wfill: i64,
    /// Band width and corner step.
    pub cw: i64,
    /// Inset of the metal band from the cell edge.
    pub mo: i64,
    /// Inset of the via bars from the cell edge.
    pub vi: i64,
    /// Staircase steps, counting both legs.
    pub steps: usize,
    /// Where the corner geometry ends along each edge.
    pub ce: i64,
}

impl SealRingGeometry {
    pub fn new(l: i64, w: i64, wfill: i64, tech: &SealRingTech) -> Self {
        let cw = tech.corner_width.nm();
        Self {
            l,
            w,
            wfill,
            cw,
            mo: tech.metal_gap.nm() + cw,
            vi: tech.via_gap.nm() + cw - tech.via_shift.nm(),
            steps: tech.corner_steps + 1,
            ce: tech.corner_end.nm(),
        }
    }

    /// The cell outline, `(0, 0)` to `(l, w)`.
    #[inline]
    pub fn outline(&self) -> Rect {
        Rect::from_coords(0, 0, self.l, self.w)
    }

    /// Side of the square enclosing the chamfered corner outside the metal band.
    #[inline]
    pub fn corner_size(&self) -> i64 {
        (self.steps as i64 - 1) * self.cw
    }

    /// The lower-left corner band starting `origin` from both cell edges.
    pub fn staircase(&self, origin: i64, thickness: i64) -> Staircase {
        Staircase::new(origin, self.cw, self.steps, thickness, self.ce)
    }

    /// A ring of uniform `width` whose outer edge is `inset` from the cell edge.
    pub fn ring(&self, inset: i64, width: i64) -> Result<Ring, RingError> {
        Ring::builder()
            .outer(Rect::from_coords(inset, inset, self.l - inset, self.w - inset))
            .uniform_width(width)
            .build()
    }

    /// The stretch of `side` between the two corners.
    pub fn straight_span(&self, side: Side) -> Span {
        match side.edge_dir() {
            Dir::Horiz => Span::new(self.ce, self.l - self.ce),
            Dir::Vert => Span::new(self.ce, self.w - self.ce),
        }
    }

    /// Offsets and orientations of the three copies of the lower-left corner.
    pub fn corner_placements(&self) -> [(Point, Named); 3] {
        [
            (Point::new(self.l, self.w), Named::R180),
            (Point::new(self.l, 0), Named::R90),
            (Point::new(0, self.w), Named::R270),
        ]
    }

    /// Offset of the half-turn copy that maps the bottom and left sides onto the top and right.
    #[inline]
    pub fn opposite(&self) -> Point {
        Point::new(self.l, self.w)
    }
}
