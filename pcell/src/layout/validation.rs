//! Checks run on a generated cell before it is handed out.

use std::fmt::Display;

use pcellgeom::{Point, Shape};

use super::cell::Cell;
use super::layers::{LayerSpec, Layers};
use crate::log::Log;

/// Validates a layout cell against the PDK's layers and layout grid.
pub fn validate_cell(cell: &Cell, layers: &Layers, grid: i64) -> LayoutValidatorOutput {
    LayoutValidator { cell, layers, grid }.validate()
}

pub struct LayoutValidator<'a> {
    cell: &'a Cell,
    layers: &'a Layers,
    grid: i64,
}

#[derive(Debug, Default)]
pub struct LayoutValidatorOutput {
    pub(crate) errors: Vec<Error>,
}

impl LayoutValidatorOutput {
    /// Logs all stored error messages.
    pub fn log(&self) {
        for error in self.errors.iter() {
            error.log();
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the first encountered error as a [`String`].
    pub fn first_error(&self) -> String {
        self.errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_default()
    }
}

/// Data for an error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Error {
    /// `name/purpose` of the offending layer spec.
    layer: String,
    cause: ErrorCause,
}

#[non_exhaustive]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ErrorCause {
    /// The layer spec has no GDS mapping.
    UnmappedLayer,
    /// A vertex does not lie on the layout grid.
    OffGrid(Point),
    /// A rectangle with zero width or height.
    DegenerateRect,
    /// A polygon with fewer than three vertices.
    DegeneratePolygon,
}

impl Error {
    pub fn new(layer: impl Into<String>, cause: ErrorCause) -> Self {
        Self {
            layer: layer.into(),
            cause,
        }
    }

    pub fn cause(&self) -> &ErrorCause {
        &self.cause
    }
}

impl Log for Error {
    fn log(&self) {
        use crate::log::error;
        error!("{self}");
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            ErrorCause::UnmappedLayer => {
                write!(f, "layer {} has no GDS layer/datatype", self.layer)
            }
            ErrorCause::OffGrid(p) => {
                write!(f, "vertex ({}, {}) on {} is off grid", p.x, p.y, self.layer)
            }
            ErrorCause::DegenerateRect => write!(f, "zero-area rectangle on {}", self.layer),
            ErrorCause::DegeneratePolygon => {
                write!(f, "polygon with fewer than 3 vertices on {}", self.layer)
            }
        }
    }
}

impl<'a> LayoutValidator<'a> {
    fn validate(&self) -> LayoutValidatorOutput {
        let mut output = LayoutValidatorOutput::default();
        for elem in self.cell.elems() {
            self.validate_layer(&elem.layer, &mut output);
            self.validate_shape(&elem.layer, &elem.inner, &mut output);
        }
        for text in self.cell.annotations() {
            self.validate_layer(&text.layer, &mut output);
            self.validate_point(&text.layer, text.loc, &mut output);
        }
        output
    }

    fn validate_layer(&self, layer: &LayerSpec, output: &mut LayoutValidatorOutput) {
        if self.layers.to_gds_spec(layer).is_none() {
            output.errors.push(Error::new(
                self.layers.describe(layer),
                ErrorCause::UnmappedLayer,
            ));
        }
    }

    fn validate_shape(&self, layer: &LayerSpec, shape: &Shape, output: &mut LayoutValidatorOutput) {
        match shape {
            Shape::Rect(r) => {
                if r.is_degenerate() {
                    output
                        .errors
                        .push(Error::new(self.layers.describe(layer), ErrorCause::DegenerateRect));
                }
                self.validate_point(layer, r.p0, output);
                self.validate_point(layer, r.p1, output);
            }
            Shape::Polygon(poly) => {
                if poly.points.len() < 3 {
                    output.errors.push(Error::new(
                        self.layers.describe(layer),
                        ErrorCause::DegeneratePolygon,
                    ));
                }
                for p in poly.points.iter() {
                    self.validate_point(layer, *p, output);
                }
            }
            Shape::Point(p) => self.validate_point(layer, *p, output),
        }
    }

    fn validate_point(&self, layer: &LayerSpec, p: Point, output: &mut LayoutValidatorOutput) {
        if !p.is_on_grid(self.grid) {
            output.errors.push(Error::new(
                self.layers.describe(layer),
                ErrorCause::OffGrid(p),
            ));
        }
    }
}
