#![allow(dead_code)]

use std::any::Any;
use std::path::PathBuf;

use itertools::Itertools;
use pcell::data::PcellCtx;
use pcell::layout::cell::Cell;
use pcell::layout::layers::Layers;
use pcell::pdk::{Pdk, Units};
use pcell::units::SiPrefix;
use pcellgeom::orientation::Named;
use pcellgeom::transform::{Transform, Transformation};
use pcellgeom::{Point, Rect, Shape, ShapeTrait};
use sg13g2_pdk::Sg13g2Pdk;

pub const BUILD_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/build");

pub fn out_path(test_name: &str, file_name: &str) -> PathBuf {
    PathBuf::from(BUILD_DIR).join(format!("tests/{test_name}/{file_name}"))
}

pub fn setup_ctx() -> PcellCtx {
    PcellCtx::new(Sg13g2Pdk::new().unwrap())
}

/// A PDK with no layers, used to check that the seal ring refuses foreign PDKs.
pub struct BarePdk;

impl Pdk for BarePdk {
    fn name(&self) -> &'static str {
        "bare"
    }

    fn process(&self) -> &'static str {
        "bare"
    }

    fn lengths(&self) -> Units {
        Units::new(SiPrefix::Nano)
    }

    fn layers(&self) -> Layers {
        Layers::new()
    }

    fn layout_grid(&self) -> i64 {
        5
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A layer name and the sorted vertices of one shape.
pub type ShapeKey = (String, Vec<(i64, i64)>);

fn shape_points(shape: &Shape) -> Vec<(i64, i64)> {
    let points: Vec<Point> = match shape {
        Shape::Rect(r) => r.corners().to_vec(),
        Shape::Polygon(p) => p.points.clone(),
        Shape::Point(p) => vec![*p],
    };
    points.into_iter().map(|p| (p.x, p.y)).sorted().collect()
}

/// Every element of `cell` after `trans`, in a canonical order.
pub fn shape_keys(ctx: &PcellCtx, cell: &Cell, trans: Transformation) -> Vec<ShapeKey> {
    cell.elems()
        .map(|e| {
            (
                ctx.layers().describe(&e.layer),
                shape_points(&e.inner.transform(trans)),
            )
        })
        .sorted()
        .collect()
}

/// Checks that `cell` maps onto itself when turned by `o` and moved by `origin`.
pub fn is_symmetric(ctx: &PcellCtx, cell: &Cell, origin: Point, o: Named) -> bool {
    let identity = shape_keys(ctx, cell, Transformation::identity());
    let turned = shape_keys(
        ctx,
        cell,
        Transformation::with_loc_and_orientation(origin, o),
    );
    identity == turned
}

/// Checks whether `rect` and a rectilinear `shape` share positive area.
///
/// Cuts `rect` at every vertex coordinate of `shape` and tests the middle of each piece.
pub fn overlaps(shape: &Shape, rect: &Rect) -> bool {
    let poly = match shape {
        Shape::Rect(r) => return r.overlaps(rect),
        Shape::Polygon(p) => p,
        Shape::Point(_) => return false,
    };
    let cuts = |lo: i64, hi: i64, coords: Vec<i64>| -> Vec<i64> {
        std::iter::once(lo)
            .chain(coords.into_iter().filter(|&c| lo < c && c < hi))
            .chain(std::iter::once(hi))
            .sorted()
            .dedup()
            .collect()
    };
    let xs = cuts(rect.left(), rect.right(), poly.points.iter().map(|p| p.x).collect());
    let ys = cuts(rect.bottom(), rect.top(), poly.points.iter().map(|p| p.y).collect());
    xs.iter().tuple_windows().any(|(&x0, &x1)| {
        ys.iter()
            .tuple_windows()
            .any(|(&y0, &y1)| poly.contains(Point::new((x0 + x1) / 2, (y0 + y1) / 2)))
    })
}
