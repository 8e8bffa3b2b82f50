//! Rectangular ring geometry.
//!
//! A ring is four straight bands hugging the edges of a rectangle. Seal rings
//! draw each band trimmed back from the corners, which are filled separately.

use array_map::ArrayMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bbox::{Bbox, BoundBox};
use super::transform::Translate;
use super::{Point, Rect, Side, Sign, Span};

/// A rectangular ring surrounding an enclosed rectangle.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ring {
    /// Vertical span of top segment.
    topv: Span,
    /// Vertical span of bottom segment.
    botv: Span,
    /// Horizontal span of left segment.
    lefth: Span,
    /// Horizontal span of right segment.
    righth: Span,
}

/// Represents all ways [`Ring`] geometry can be specified.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RingContents {
    /// The ring must fit within the given rectangle.
    Outer(Rect),
    /// The ring must enclose the given rectangle.
    Inner(Rect),
}

impl RingContents {
    pub fn rect(&self) -> Rect {
        match self {
            Self::Outer(r) => *r,
            Self::Inner(r) => *r,
        }
    }

    pub fn is_outer(&self) -> bool {
        matches!(self, Self::Outer(_))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RingError {
    #[error("ring has no outer or inner rectangle")]
    MissingContents,
    #[error("ring bands overlap; widths are too large for {0:?}")]
    BandsOverlap(Rect),
}

#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RingBuilder {
    contents: Option<RingContents>,
    widths: ArrayMap<Side, i64, 4>,
}

impl Ring {
    #[inline]
    pub fn builder() -> RingBuilder {
        RingBuilder::new()
    }

    fn is_valid(&self) -> bool {
        self.topv.start() > self.botv.stop() && self.righth.start() > self.lefth.stop()
    }

    pub fn outer_hspan(&self) -> Span {
        Span::new(self.lefth.start(), self.righth.stop())
    }

    pub fn inner_hspan(&self) -> Span {
        Span::new(self.lefth.stop(), self.righth.start())
    }

    pub fn outer_vspan(&self) -> Span {
        Span::new(self.botv.start(), self.topv.stop())
    }

    pub fn inner_vspan(&self) -> Span {
        Span::new(self.botv.stop(), self.topv.start())
    }

    pub fn outer(&self) -> Rect {
        Rect::from_spans(self.outer_hspan(), self.outer_vspan())
    }

    pub fn inner(&self) -> Rect {
        Rect::from_spans(self.inner_hspan(), self.inner_vspan())
    }

    /// The full band along `side`, corners included.
    #[inline]
    pub fn rect(&self, side: Side) -> Rect {
        match side {
            Side::Top => Rect::from_spans(self.outer_hspan(), self.topv),
            Side::Right => Rect::from_spans(self.righth, self.outer_vspan()),
            Side::Bot => Rect::from_spans(self.outer_hspan(), self.botv),
            Side::Left => Rect::from_spans(self.lefth, self.outer_vspan()),
        }
    }

    /// The band along `side`, restricted to `span` along the edge direction.
    ///
    /// Returns [`None`] if `span` misses the band or leaves it with zero length.
    pub fn segment(&self, side: Side, span: Span) -> Option<Rect> {
        let band = self.rect(side);
        let dir = side.edge_dir();
        band.span(dir)
            .intersection(span)
            .filter(|s| s.length() > 0)
            .map(|s| band.with_span(s, dir))
    }

    /// Thickness of the band along `side`.
    pub fn width(&self, side: Side) -> i64 {
        self.rect(side).span(side.edge_dir().other()).length()
    }

    #[inline]
    pub fn rects(&self) -> [Rect; 4] {
        Side::ALL.map(|side| self.rect(side))
    }
}

impl BoundBox for Ring {
    #[inline]
    fn bbox(&self) -> Bbox {
        self.outer().bbox()
    }
}

impl Translate for Ring {
    fn translate(&mut self, p: Point) {
        *self = Self {
            lefth: self.lefth.translate(p.x),
            righth: self.righth.translate(p.x),
            topv: self.topv.translate(p.y),
            botv: self.botv.translate(p.y),
        };
    }
}

impl TryFrom<RingBuilder> for Ring {
    type Error = RingError;

    fn try_from(value: RingBuilder) -> Result<Self, Self::Error> {
        let contents = value.contents.ok_or(RingError::MissingContents)?;
        let r = contents.rect();

        let sign = if contents.is_outer() {
            Sign::Pos
        } else {
            Sign::Neg
        };

        let topv = Span::with_point_and_length(sign, r.top(), value.widths[Side::Top]);
        let righth = Span::with_point_and_length(sign, r.right(), value.widths[Side::Right]);
        let lefth = Span::with_point_and_length(!sign, r.left(), value.widths[Side::Left]);
        let botv = Span::with_point_and_length(!sign, r.bottom(), value.widths[Side::Bot]);

        let res = Self {
            topv,
            botv,
            lefth,
            righth,
        };

        if !res.is_valid() {
            return Err(RingError::BandsOverlap(r));
        }
        Ok(res)
    }
}

impl RingBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn build(&mut self) -> Result<Ring, RingError> {
        Ring::try_from(*self)
    }

    pub fn outer(&mut self, rect: Rect) -> &mut Self {
        self.contents = Some(RingContents::Outer(rect));
        self
    }

    pub fn inner(&mut self, rect: Rect) -> &mut Self {
        self.contents = Some(RingContents::Inner(rect));
        self
    }

    pub fn side_width(&mut self, side: Side, value: i64) -> &mut Self {
        self.widths[side] = value;
        self
    }

    /// Sets the width of all ring edges to the given value.
    pub fn uniform_width(&mut self, value: i64) -> &mut Self {
        for side in Side::ALL {
            self.side_width(side, value);
        }
        self
    }
}
