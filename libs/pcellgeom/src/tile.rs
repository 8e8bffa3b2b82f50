//! Regular tilings of rectangular regions.

use serde::{Deserialize, Serialize};

use super::{snap_to_grid, Dims, Dir, Point, Rect};

/// Fixed-size rectangles placed at a fixed pitch inside a region.
///
/// Tiles are laid out in lines running along `dir`, starting from the
/// lower-left corner of the region. Only tiles lying fully inside the
/// region are produced.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileGrid {
    pub region: Rect,
    pub tile: Dims,
    /// Gap between adjacent tiles; zero gives abutting tiles.
    pub space: Dims,
    /// Direction along which each line of tiles runs.
    pub dir: Dir,
    /// Shift every odd line by half a pitch along `dir`.
    pub stagger: bool,
    /// Grid the stagger offset is snapped to.
    pub grid: i64,
}

impl TileGrid {
    pub fn new(region: Rect, tile: Dims, space: Dims, dir: Dir) -> Self {
        Self {
            region,
            tile,
            space,
            dir,
            stagger: false,
            grid: 1,
        }
    }

    pub fn stagger(mut self, stagger: bool) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn grid(mut self, grid: i64) -> Self {
        self.grid = grid.max(1);
        self
    }

    #[inline]
    pub fn pitch(&self) -> Dims {
        self.tile + self.space
    }

    /// Offset applied along `dir` to line number `line`.
    fn line_offset(&self, line: i64) -> i64 {
        if self.stagger && line % 2 == 1 {
            snap_to_grid(self.pitch().dim(self.dir) / 2, self.grid)
        } else {
            0
        }
    }

    /// Lists the tiles, line by line.
    pub fn tiles(&self) -> Vec<Rect> {
        let along = self.dir;
        let across = self.dir.other();
        let (tile_along, tile_across) = (self.tile.dim(along), self.tile.dim(across));
        let (pitch_along, pitch_across) = (self.pitch().dim(along), self.pitch().dim(across));

        if tile_along <= 0 || tile_across <= 0 {
            return Vec::new();
        }

        let run = self.region.span(along);
        let lines = self.region.span(across);
        let mut tiles = Vec::new();

        let mut line = 0;
        let mut b = lines.start();
        while b + tile_across <= lines.stop() {
            let mut a = run.start() + self.line_offset(line);
            while a + tile_along <= run.stop() {
                let p0 = Point::from_dir_coords(along, a, b);
                tiles.push(Rect::with_dims_at(p0, self.tile));
                a += pitch_along;
            }
            b += pitch_across;
            line += 1;
        }
        tiles
    }
}
