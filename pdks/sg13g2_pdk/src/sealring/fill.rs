//! Density fillers around the seal ring.
//!
//! Recipes cover the bottom and left sides plus the lower-left corner. The
//! caller draws the group a second time, turned half way round, for the top
//! and right sides.

use pcell::error::Result;
use pcell::layout::elements::fill::FillArray;
use pcell::layout::group::Group;
use pcell::layout::layers::LayerSpec;
use pcellgeom::tile::TileGrid;
use pcellgeom::{Dims, Dir, Point, Polygon, Rect};

use super::geometry::SealRingGeometry;
use super::SealRingLayers;
use crate::tech::TechParams;

/// Staggered filler arrays collected into a single group.
struct Fillers {
    group: Group,
    grid: i64,
}

impl Fillers {
    fn new(grid: i64) -> Self {
        Self {
            group: Group::new(),
            grid,
        }
    }

    /// Fills the region `(x0, y0)-(x1, y1)`. Empty regions are skipped.
    fn staggered(
        &mut self,
        layer: LayerSpec,
        (x0, y0, x1, y1): (i64, i64, i64, i64),
        tile: Dims,
        space: Dims,
        dir: Dir,
    ) -> Result<()> {
        let Some(region) = Rect::checked_from_coords(x0, y0, x1, y1) else {
            return Ok(());
        };
        let grid = TileGrid::new(region, tile, space, dir)
            .stagger(true)
            .grid(self.grid);
        self.group.draw(FillArray::new(layer, grid))
    }

    fn finish(self) -> Group {
        self.group
    }
}

/// Builds the filler group for the bottom and left sides.
pub(crate) fn filler_group(
    g: &SealRingGeometry,
    tech: &TechParams,
    layers: &SealRingLayers,
    grid: i64,
) -> Result<Group> {
    let (l, w, mo, wf) = (g.l, g.w, g.mo, g.wfill);
    let mut fillers = Fillers::new(grid);

    // Active and poly.
    let d = tech.gfil_d.nm();
    let active = LayerSpec::filler(layers.active);
    fillers.staggered(
        active.clone(),
        (mo - wf, mo - wf + 800, l - mo, mo - d - 800),
        Dims::square(3_400),
        Dims::square(1_600),
        Dir::Horiz,
    )?;
    fillers.staggered(
        active,
        (mo - wf + 1_000, mo - 900, mo - 1_800, w + wf - mo),
        Dims::square(3_400),
        Dims::square(1_600),
        Dir::Vert,
    )?;
    let poly = LayerSpec::filler(layers.poly);
    fillers.staggered(
        poly.clone(),
        (mo - wf + 1_000, mo - wf, l - mo - 1_000, mo - d),
        Dims::new(1_400, 5_000),
        Dims::new(3_600, 0),
        Dir::Horiz,
    )?;
    fillers.staggered(
        poly,
        (mo - wf + 200, mo + 100, mo - 1_000, w + wf - mo - 1_000),
        Dims::new(5_000, 1_400),
        Dims::new(0, 3_600),
        Dir::Vert,
    )?;

    // Metal1 to Metal5.
    let (fh, fw) = (tech.mfil_a1.nm(), tech.mfil_a2.nm());
    let fs = tech.sealring.metal_fill_space.nm();
    let d = tech.mfil_b.nm();
    let corner = g.corner_size();
    let triangle = Polygon::from_verts(vec![
        Point::new(mo, mo),
        Point::new(mo + corner, mo),
        Point::new(mo, mo + corner),
    ]);
    for &metal in layers.fill_metals.iter() {
        let spec = LayerSpec::filler(metal);
        fillers.staggered(
            spec.clone(),
            (mo - wf, mo - wf, l - mo, mo - d),
            Dims::new(fw, fh),
            Dims::square(fs),
            Dir::Horiz,
        )?;
        fillers.staggered(
            spec.clone(),
            (mo - wf, mo + 800, mo - fs, w + wf - mo),
            Dims::new(fh, fw),
            Dims::square(fs),
            Dir::Vert,
        )?;
        let corner_grid = TileGrid::new(
            Rect::from_coords(mo, mo, mo + corner, mo + corner),
            Dims::square(fh),
            Dims::square(fs),
            Dir::Horiz,
        );
        fillers
            .group
            .draw(FillArray::new(spec, corner_grid).with_clip(triangle.clone()))?;
    }

    // TopMetal1 and TopMetal2.
    let (fh, fw) = (tech.tm1fil_a.nm(), tech.tm1fil_a1.nm());
    let fs = tech.sealring.top_metal_fill_space.nm();
    let d = tech.tm1fil_c.nm();
    let square = tech.sealring.top_metal_corner_fill.nm();
    for &metal in layers.top_metals.iter() {
        let spec = LayerSpec::filler(metal);
        fillers.staggered(
            spec.clone(),
            (mo - wf, mo - wf, l - mo, mo - d),
            Dims::new(fw, fh),
            Dims::square(fs),
            Dir::Horiz,
        )?;
        fillers.staggered(
            spec.clone(),
            (mo - wf, mo + 800, mo - fs, w + wf - mo),
            Dims::new(fh, fw),
            Dims::square(fs),
            Dir::Vert,
        )?;
        fillers
            .group
            .add_rect(spec, Rect::from_coords(mo, mo, mo + square, mo + square));
    }

    Ok(fillers.finish())
}

#[cfg(test)]
mod tests {
    use pcellgeom::bbox::BoundBox;

    use super::*;
    use crate::Sg13g2Pdk;

    fn fillers(wfill: i64) -> (SealRingGeometry, SealRingLayers, Group) {
        let tech = TechParams::embedded().unwrap();
        let layers = Sg13g2Pdk::load_layers().unwrap();
        let layers = SealRingLayers::resolve(&layers, &tech).unwrap();
        let g = SealRingGeometry::new(150_000, 150_000, wfill, &tech.sealring);
        let group = filler_group(&g, &tech, &layers, 5).unwrap();
        (g, layers, group)
    }

    #[test]
    fn fillers_stay_outside_the_metal_band() {
        let (g, layers, group) = fillers(30_000);
        assert!(!group.is_empty());

        let band = g.staircase(g.mo, g.cw).polygon().unwrap();
        let bottom = Rect::from_coords(g.ce, g.mo, g.l - g.ce, g.mo + g.cw);
        let left = Rect::from_coords(g.mo, g.ce, g.mo + g.cw, g.w - g.ce);
        for elem in group.elements() {
            let tile = elem.inner.as_rect().unwrap();
            assert!(!tile.overlaps(&bottom), "{tile:?} overlaps the bottom band");
            assert!(!tile.overlaps(&left), "{tile:?} overlaps the left band");
            // Only the corner tiles sit inside the staircase's bounding square.
            if tile.left() >= g.mo && tile.bottom() >= g.mo {
                assert!(tile.right() + tile.top() <= 2 * g.mo + g.corner_size());
                assert!(band.brect().unwrap().contains_rect(&tile));
            }
        }

        let corner_tiles = group
            .elements()
            .filter(|e| e.layer == LayerSpec::filler(layers.fill_metals[0]))
            .filter_map(|e| e.inner.as_rect())
            .filter(|r| r.left() >= g.mo && r.bottom() >= g.mo)
            .count();
        // Rows of 1um tiles at a 2.2um pitch under the 16.8um diagonal: 7 + 6 + 5 + 4 + 3 + 2 + 1.
        assert_eq!(corner_tiles, 28);
    }

    #[test]
    fn top_metal_corner_square() {
        let (g, layers, group) = fillers(30_000);
        let square = Rect::from_coords(g.mo, g.mo, g.mo + 5_000, g.mo + 5_000);
        for &metal in layers.top_metals.iter() {
            assert!(group
                .elements()
                .any(|e| e.layer == LayerSpec::filler(metal) && e.inner.as_rect() == Some(square)));
        }
    }

    #[test]
    fn narrow_bands_skip_empty_regions() {
        let (_, layers, group) = fillers(1_000);
        // Only the corner fillers remain once the band is too narrow for any side tile.
        assert!(group
            .elements()
            .all(|e| e.inner.as_rect().map_or(false, |r| r.left() >= 7_200 && r.bottom() >= 7_200)));
        assert!(group
            .elements()
            .all(|e| e.layer != LayerSpec::filler(layers.active)));
    }
}
