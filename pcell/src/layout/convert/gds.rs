//! Utilities for GDS conversion.
//!
//! Converts flat layout cells to [`gds21`] structures.

use std::convert::TryInto;
use std::path::Path;

use pcellgeom::{Point, Shape};

use super::error::{ErrorContext, ErrorHelper};
use crate::data::PcellCtx;
use crate::error::{with_err_context, ErrorContext as PcellErrorContext, ErrorSource, Result};
use crate::layout::cell::{Cell, Element, TextElement};
use crate::layout::error::{LayoutError, LayoutResult};
use crate::layout::layers::{LayerSpec, Layers};
use crate::log::debug;
use crate::units::SiPrefix;

/// A GDSII exporter.
///
/// Converts a [`Cell`] to a single-structure GDSII library ([`gds21::GdsLibrary`]).
#[derive(Debug)]
pub struct GdsExporter<'a> {
    layers: &'a Layers,
    units: SiPrefix,
    backtrace: Vec<ErrorContext>,
}

/// Additional [`PcellCtx`] methods for GDSII conversion.
impl PcellCtx {
    /// Converts `cell` to a GDSII library whose only structure is `cell`.
    pub fn to_gds_lib(&self, cell: &Cell) -> Result<gds21::GdsLibrary> {
        let inner = || -> Result<gds21::GdsLibrary> {
            let lib = GdsExporter::new(self.layers(), self.pdk().lengths().layout)
                .export_lib(cell)
                .map_err(ErrorSource::Layout)?;
            Ok(lib)
        };
        with_err_context(inner(), || {
            PcellErrorContext::Task(arcstr::format!(
                "converting cell {} to GDS library",
                cell.name()
            ))
        })
    }

    /// Saves `cell` to a GDS file.
    pub fn to_gds(&self, cell: &Cell, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let inner = || -> Result<()> {
            self.to_gds_lib(cell)?
                .save(path)
                .map_err(LayoutError::from)
                .map_err(ErrorSource::Layout)?;
            debug!("wrote {} elements to {:?}", cell.len(), path);
            Ok(())
        };
        with_err_context(inner(), || {
            PcellErrorContext::Task(arcstr::format!("writing GDS to file {:?}", path))
        })
    }
}

impl<'a> GdsExporter<'a> {
    pub fn new(layers: &'a Layers, units: SiPrefix) -> Self {
        Self {
            layers,
            units,
            backtrace: Vec::new(),
        }
    }

    /// Exports to a [`gds21::GdsLibrary`].
    pub fn export_lib(&mut self, cell: &Cell) -> LayoutResult<gds21::GdsLibrary> {
        self.backtrace.push(ErrorContext::Library);
        let mut gdslib = gds21::GdsLibrary::new(cell.name().as_str());

        // In all cases the GDSII "user units" are set to 1um.
        self.backtrace.push(ErrorContext::Units);
        gdslib.units = match self.units {
            SiPrefix::Micro => gds21::GdsUnits::new(1.0, 1e-6),
            SiPrefix::Nano => gds21::GdsUnits::new(1e-3, 1e-9),
            SiPrefix::Pico => gds21::GdsUnits::new(1e-6, 1e-12),
            units => {
                return self.fail(format!("Invalid unit prefix for library: {units:?}"));
            }
        };
        self.backtrace.pop();

        let strukt = self.export_cell(cell)?;
        gdslib.structs.push(strukt);
        self.backtrace.pop();
        Ok(gdslib)
    }

    /// Converts a [`Cell`] to a [`gds21::GdsStruct`] cell definition.
    pub fn export_cell(&mut self, cell: &Cell) -> LayoutResult<gds21::GdsStruct> {
        self.backtrace.push(ErrorContext::Cell(cell.name().clone()));
        self.assert(!cell.name().is_empty(), "Cell names must be non-empty")?;

        let mut elems = Vec::with_capacity(cell.len());

        self.backtrace.push(ErrorContext::Geometry);
        for elem in cell.elems() {
            if let Some(e) = self.export_element(elem)? {
                elems.push(e);
            }
        }
        self.backtrace.pop();

        self.backtrace.push(ErrorContext::Annotations);
        for annotation in cell.annotations() {
            elems.push(self.export_annotation(annotation)?);
        }
        self.backtrace.pop();

        let mut strukt = gds21::GdsStruct::new(cell.name().as_str());
        strukt.elems = elems;

        self.backtrace.pop();
        Ok(strukt)
    }

    /// Converts a [`LayerSpec`] to a [`gds21::GdsLayerSpec`].
    pub fn export_layerspec(&mut self, spec: &LayerSpec) -> LayoutResult<gds21::GdsLayerSpec> {
        Ok(self
            .unwrap(
                self.layers.to_gds_spec(spec),
                format!(
                    "No GDS spec found for layer spec {}",
                    self.layers.describe(spec)
                ),
            )?
            .into())
    }

    /// Converts an [`Element`] into a [`gds21::GdsElement`].
    ///
    /// Point-shaped elements have no GDS counterpart and are skipped.
    pub fn export_element(&mut self, elem: &Element) -> LayoutResult<Option<gds21::GdsElement>> {
        let layerspec = self.export_layerspec(&elem.layer)?;
        self.export_shape(&elem.inner, &layerspec)
    }

    /// Converts a [`Shape`] to a [`gds21::GdsElement`].
    ///
    /// GDS shapes include an explicit repetition of their origin for closure.
    /// So an N-sided polygon is described by a (N+1)-point vector.
    pub fn export_shape(
        &mut self,
        shape: &Shape,
        layerspec: &gds21::GdsLayerSpec,
    ) -> LayoutResult<Option<gds21::GdsElement>> {
        let xy = match shape {
            Shape::Rect(r) => {
                let x0: i32 = r.p0.x.try_into()?;
                let y0: i32 = r.p0.y.try_into()?;
                let x1: i32 = r.p1.x.try_into()?;
                let y1: i32 = r.p1.y.try_into()?;
                [(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]
                    .into_iter()
                    .map(|(x, y)| gds21::GdsPoint::new(x, y))
                    .collect::<Vec<_>>()
            }
            Shape::Polygon(poly) => {
                self.assert(
                    poly.points.len() >= 3,
                    format!("Polygon has only {} vertices", poly.points.len()),
                )?;
                let mut xy = poly
                    .points
                    .iter()
                    .map(|p| self.export_point(p))
                    .collect::<LayoutResult<Vec<_>>>()?;
                // Add the origin a second time, to "close" the polygon
                xy.push(self.export_point(&poly.points[0])?);
                xy
            }
            Shape::Point(_) => return Ok(None),
        };
        Ok(Some(
            gds21::GdsBoundary {
                layer: layerspec.layer,
                datatype: layerspec.xtype,
                xy,
                ..Default::default()
            }
            .into(),
        ))
    }

    /// Converts a [`TextElement`] to a [`gds21::GdsElement`].
    pub fn export_annotation(
        &mut self,
        text_elem: &TextElement,
    ) -> LayoutResult<gds21::GdsElement> {
        let layerspec = self.export_layerspec(&text_elem.layer)?;

        Ok(gds21::GdsTextElem {
            string: text_elem.string.to_string(),
            layer: layerspec.layer,
            texttype: layerspec.xtype,
            xy: self.export_point(&text_elem.loc)?,
            strans: None,
            ..Default::default()
        }
        .into())
    }

    /// Convert a [`Point`] to a GDS21 [`gds21::GdsPoint`].
    pub fn export_point(&self, pt: &Point) -> LayoutResult<gds21::GdsPoint> {
        let x = pt.x.try_into()?;
        let y = pt.y.try_into()?;
        Ok(gds21::GdsPoint::new(x, y))
    }
}

impl ErrorHelper for GdsExporter<'_> {
    type Error = LayoutError;
    fn err(&self, msg: impl Into<String>) -> LayoutError {
        LayoutError::Export {
            message: msg.into(),
            stack: self.backtrace.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pcellgeom::{Polygon, Rect};

    use super::*;
    use crate::layout::layers::{GdsLayerSpec, LayerInfo, LayerPurpose};

    fn layers() -> Layers {
        let mut info = LayerInfo::builder().name("Metal1").build().unwrap();
        info.add_purpose(LayerPurpose::Drawing, GdsLayerSpec(8, 0));
        info.add_purpose(LayerPurpose::Label, GdsLayerSpec(8, 25));
        Layers::from_layer_infos(vec![info])
    }

    #[test]
    fn exports_closed_boundaries() {
        let layers = layers();
        let m1 = layers.get_key("Metal1").unwrap();

        let mut cell = Cell::new("ring");
        cell.add_element(Element::new(
            LayerSpec::drawing(m1),
            Rect::from_coords(0, 0, 4200, 150_000),
        ));
        cell.add_element(Element::new(
            LayerSpec::drawing(m1),
            Polygon::from_verts(vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(0, 10),
            ]),
        ));
        cell.add_element(Element::new(LayerSpec::drawing(m1), Point::new(1, 1)));
        cell.add_annotation(TextElement::new(
            "sub!",
            Point::new(2100, 75_000),
            LayerSpec::label(m1),
        ));

        let lib = GdsExporter::new(&layers, SiPrefix::Nano)
            .export_lib(&cell)
            .unwrap();
        assert_eq!(lib.name, "ring");
        assert_eq!(lib.structs.len(), 1);
        let elems = &lib.structs[0].elems;
        assert_eq!(elems.len(), 3);

        match &elems[0] {
            gds21::GdsElement::GdsBoundary(b) => {
                assert_eq!((b.layer, b.datatype), (8, 0));
                assert_eq!(b.xy.len(), 5);
                assert_eq!(b.xy[0], b.xy[4]);
                assert_eq!(b.xy[2], gds21::GdsPoint::new(4200, 150_000));
            }
            other => panic!("expected a boundary, got {other:?}"),
        }
        match &elems[1] {
            gds21::GdsElement::GdsBoundary(b) => assert_eq!(b.xy.len(), 4),
            other => panic!("expected a boundary, got {other:?}"),
        }
        match &elems[2] {
            gds21::GdsElement::GdsTextElem(t) => {
                assert_eq!(t.string, "sub!");
                assert_eq!((t.layer, t.texttype), (8, 25));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn missing_purpose_is_an_export_error() {
        let layers = layers();
        let m1 = layers.get_key("Metal1").unwrap();
        let mut cell = Cell::new("ring");
        cell.add_element(Element::new(
            LayerSpec::filler(m1),
            Rect::from_coords(0, 0, 10, 10),
        ));
        let err = GdsExporter::new(&layers, SiPrefix::Nano)
            .export_lib(&cell)
            .unwrap_err();
        assert!(matches!(err, LayoutError::Export { .. }));
    }

    #[test]
    fn coordinates_must_fit_in_i32() {
        let layers = layers();
        let m1 = layers.get_key("Metal1").unwrap();
        let mut cell = Cell::new("huge");
        cell.add_element(Element::new(
            LayerSpec::drawing(m1),
            Rect::from_coords(0, 0, i64::from(i32::MAX) + 1, 10),
        ));
        assert!(GdsExporter::new(&layers, SiPrefix::Nano)
            .export_lib(&cell)
            .is_err());
    }

    #[test]
    fn polygon_vertices_must_fit_in_i32() {
        let layers = layers();
        let m1 = layers.get_key("Metal1").unwrap();
        let mut cell = Cell::new("huge");
        cell.add_element(Element::new(
            LayerSpec::drawing(m1),
            Polygon::from_verts(vec![
                Point::new(0, 0),
                Point::new(i64::from(i32::MAX) + 1, 0),
                Point::new(0, 10),
            ]),
        ));
        let err = GdsExporter::new(&layers, SiPrefix::Nano)
            .export_lib(&cell)
            .unwrap_err();
        assert!(matches!(err, LayoutError::Boxed(_)));
    }
}
