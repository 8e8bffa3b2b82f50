//! Context methods for drawing component layouts.

use std::sync::Arc;

use pcellgeom::bbox::{Bbox, BoundBox};
use pcellgeom::Rect;

use super::cell::{Cell, Element, TextElement};
use super::group::Group;
use super::layers::{LayerSpec, Layers};
use super::Draw;
use crate::data::PcellCtx;
use crate::error::Result;
use crate::pdk::Pdk;

/// Context for creating the layout view of a [`Component`](crate::component::Component).
pub struct LayoutCtx {
    pub(crate) inner: PcellCtx,
    /// The layout cell being created.
    pub(crate) cell: Cell,
}

impl LayoutCtx {
    pub(crate) fn new(inner: PcellCtx, cell: Cell) -> Self {
        Self { inner, cell }
    }

    /// Returns a reference to the global [`PcellCtx`].
    #[inline]
    pub fn inner(&self) -> &PcellCtx {
        &self.inner
    }

    #[inline]
    pub fn pdk(&self) -> Arc<dyn Pdk> {
        self.inner.pdk()
    }

    /// Returns the PDK's layer table.
    #[inline]
    pub fn layers(&self) -> &Layers {
        self.inner.layers()
    }

    /// The PDK's layout grid, in layout units.
    #[inline]
    pub fn layout_grid(&self) -> i64 {
        self.inner.pdk().layout_grid()
    }

    /// The cell drawn so far.
    #[inline]
    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.cell.elems()
    }

    /// Draws a rectangle on layer spec `layer`.
    pub fn draw_rect(&mut self, layer: LayerSpec, rect: Rect) {
        self.cell.add_element(Element::new(layer, rect));
    }

    pub fn draw<T>(&mut self, value: T) -> Result<()>
    where
        T: Draw,
    {
        let group = value.draw()?;
        self.add_group(group);
        Ok(())
    }

    /// Adds the transformed contents of `group` to the cell.
    pub fn add_group(&mut self, group: Group) {
        self.cell.add_elements(group.elements());
        for annotation in group.annotations() {
            self.cell.add_annotation(annotation);
        }
    }

    pub fn add_annotation(&mut self, annotation: TextElement) {
        self.cell.add_annotation(annotation);
    }

    pub fn bbox(&self) -> Bbox {
        self.cell.bbox()
    }

    pub(crate) fn finish(self) -> Cell {
        self.cell
    }
}
