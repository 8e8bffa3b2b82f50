//! Groups of layout objects.
//!
//! A [`Group`] collects elements drawn in local coordinates and places them
//! with a single location and orientation. Drawing the same group at several
//! orientations copies its contents, which is how symmetric structures such
//! as ring corners are replicated.

use pcellgeom::bbox::{Bbox, BoundBox};
use pcellgeom::orientation::Orientation;
use pcellgeom::transform::{Transform, Transformation};
use pcellgeom::{Point, Polygon, Rect};

use super::cell::{Element, TextElement};
use super::layers::LayerSpec;
use super::Draw;
use crate::error::Result;

/// A group of layout [`Element`]s and [`TextElement`]s.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Group {
    /// Translates all elements in the group by an offset.
    loc: Point,
    /// The orientation of the group, applied before the offset.
    orientation: Orientation,
    elems: Vec<Element>,
    annotations: Vec<TextElement>,
}

impl Group {
    /// Creates a new, empty [`Group`] with no translation or orientation.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn transformation(&self) -> Transformation {
        Transformation::with_loc_and_orientation(self.loc, self.orientation)
    }

    #[inline]
    pub fn loc(&self) -> Point {
        self.loc
    }

    #[inline]
    pub fn set_loc(&mut self, p: impl Into<Point>) {
        self.loc = p.into();
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Sets the orientation of the group.
    ///
    /// Orientations are applied about the local origin, before translation.
    #[inline]
    pub fn set_orientation(&mut self, o: impl Into<Orientation>) {
        self.orientation = o.into();
    }

    /// Returns a copy of the group placed at `loc` with orientation `o`.
    pub fn placed(&self, loc: impl Into<Point>, o: impl Into<Orientation>) -> Self {
        let mut copy = self.clone();
        copy.set_loc(loc);
        copy.set_orientation(o);
        copy
    }

    #[inline]
    pub fn add_element(&mut self, elt: impl Into<Element>) {
        self.elems.push(elt.into());
    }

    pub fn add_rect(&mut self, layer: LayerSpec, rect: impl Into<Rect>) {
        self.elems.push(Element::new(layer, rect.into()));
    }

    pub fn add_polygon(&mut self, layer: LayerSpec, poly: Polygon) {
        self.elems.push(Element::new(layer, poly));
    }

    pub fn add_annotation(&mut self, text: TextElement) {
        self.annotations.push(text);
    }

    /// Adds the contents of `group`, as placed by its own transformation.
    pub fn add_group(&mut self, group: Group) {
        self.elems.extend(group.elements());
        self.annotations.extend(group.annotations());
    }

    /// Draws anything drawable into this group.
    pub fn draw(&mut self, item: impl Draw) -> Result<()> {
        self.add_group(item.draw()?);
        Ok(())
    }

    /// Returns an iterator over the elements in this group **after transformation**.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        let transformation = self.transformation();
        self.elems.iter().map(move |e| e.transform(transformation))
    }

    /// Returns an iterator over the annotations in this group **after transformation**.
    pub fn annotations(&self) -> impl Iterator<Item = TextElement> + '_ {
        let transformation = self.transformation();
        self.annotations
            .iter()
            .map(move |a| a.transform(transformation))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty() && self.annotations.is_empty()
    }
}

impl Draw for Group {
    fn draw(self) -> Result<Group> {
        Ok(self)
    }
}

impl BoundBox for Group {
    fn bbox(&self) -> Bbox {
        self.elements()
            .fold(Bbox::empty(), |acc, e| acc.union(e.bbox()))
    }
}
