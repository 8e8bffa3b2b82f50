//! Layout cells and the elements they contain.

use std::collections::BTreeMap;

use arcstr::ArcStr;
use pcellgeom::bbox::{Bbox, BoundBox};
use pcellgeom::transform::{Transform, Transformation, Translate};
use pcellgeom::{Point, Shape};
use serde::{Deserialize, Serialize};

use super::layers::{LayerKey, LayerSpec};

/// A flat layout cell: named geometry and text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's name.
    name: ArcStr,
    /// A list of primitive/geometric elements.
    elems: Vec<Element>,
    /// A list of text annotations.
    annotations: Vec<TextElement>,
}

/// A primitive layout element: a shape on a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// The layer spec where the element is located.
    pub layer: LayerSpec,
    /// The element's shape.
    pub inner: Shape,
}

impl Element {
    pub fn new(layer: LayerSpec, shape: impl Into<Shape>) -> Self {
        Self {
            layer,
            inner: shape.into(),
        }
    }

    #[inline]
    pub fn layer(&self) -> &LayerSpec {
        &self.layer
    }

    #[inline]
    pub fn inner(&self) -> &Shape {
        &self.inner
    }
}

impl Transform for Element {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            layer: self.layer.clone(),
            inner: self.inner.transform(trans),
        }
    }
}

impl Translate for Element {
    fn translate(&mut self, p: Point) {
        self.inner.translate(p);
    }
}

impl BoundBox for Element {
    fn bbox(&self) -> Bbox {
        self.inner.bbox()
    }
}

/// A text annotation placed at a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextElement {
    /// The string value of the annotation.
    pub string: ArcStr,
    /// The location of the annotation.
    pub loc: Point,
    /// The layer on which the annotation resides.
    pub layer: LayerSpec,
}

impl TextElement {
    pub fn new(string: impl Into<ArcStr>, loc: Point, layer: LayerSpec) -> Self {
        Self {
            string: string.into(),
            loc,
            layer,
        }
    }
}

impl Transform for TextElement {
    fn transform(&self, trans: Transformation) -> Self {
        Self {
            string: self.string.clone(),
            loc: self.loc.transform(trans),
            layer: self.layer.clone(),
        }
    }
}

impl Translate for TextElement {
    fn translate(&mut self, p: Point) {
        self.loc.translate(p);
    }
}

impl Cell {
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    pub fn add_element(&mut self, elem: impl Into<Element>) {
        self.elems.push(elem.into());
    }

    pub fn add_elements(&mut self, elems: impl IntoIterator<Item = Element>) {
        self.elems.extend(elems);
    }

    pub fn add_annotation(&mut self, annotation: TextElement) {
        self.annotations.push(annotation);
    }

    pub fn elems(&self) -> impl Iterator<Item = &Element> {
        self.elems.iter()
    }

    pub fn annotations(&self) -> impl Iterator<Item = &TextElement> {
        self.annotations.iter()
    }

    /// Elements drawn on exactly `spec`.
    pub fn elems_on<'a>(&'a self, spec: &'a LayerSpec) -> impl Iterator<Item = &'a Element> + 'a {
        self.elems.iter().filter(move |e| &e.layer == spec)
    }

    /// Elements drawn on any purpose of `layer`.
    pub fn elems_on_layer(&self, layer: LayerKey) -> impl Iterator<Item = &Element> {
        self.elems.iter().filter(move |e| e.layer.layer() == layer)
    }

    /// Number of elements per layer spec.
    pub fn layer_counts(&self) -> BTreeMap<LayerSpec, usize> {
        let mut counts = BTreeMap::new();
        for elem in self.elems.iter() {
            *counts.entry(elem.layer.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Bounding box of the elements on `spec`.
    pub fn layer_bbox(&self, spec: &LayerSpec) -> Bbox {
        self.elems_on(spec)
            .fold(Bbox::empty(), |acc, e| acc.union(e.bbox()))
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

impl BoundBox for Cell {
    fn bbox(&self) -> Bbox {
        let elems = self.elems.bbox();
        self.annotations
            .iter()
            .fold(elems, |acc, a| acc.union(a.loc.bbox()))
    }
}
