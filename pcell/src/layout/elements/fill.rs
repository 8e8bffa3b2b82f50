//! Filler arrays for layer density rules.

use pcellgeom::tile::TileGrid;
use pcellgeom::{Polygon, Rect};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::group::Group;
use crate::layout::layers::LayerSpec;
use crate::layout::Draw;

/// An array of filler tiles drawn on one layer.
///
/// When a clipping polygon is given, only tiles lying entirely inside it are
/// drawn. The check tests tile corners, so it is exact for convex clips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FillArray {
    pub layer: LayerSpec,
    pub grid: TileGrid,
    pub clip: Option<Polygon>,
}

impl FillArray {
    pub fn new(layer: LayerSpec, grid: TileGrid) -> Self {
        Self {
            layer,
            grid,
            clip: None,
        }
    }

    pub fn with_clip(mut self, clip: Polygon) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Number of tiles that will be drawn.
    pub fn count(&self) -> usize {
        self.kept().count()
    }

    fn kept(&self) -> impl Iterator<Item = Rect> + '_ {
        self.grid.tiles().into_iter().filter(move |tile| {
            self.clip
                .as_ref()
                .map(|clip| clip.contains_rect(tile))
                .unwrap_or(true)
        })
    }
}

impl Draw for FillArray {
    fn draw(self) -> Result<Group> {
        let mut group = Group::new();
        for tile in self.kept() {
            group.add_rect(self.layer.clone(), tile);
        }
        Ok(group)
    }
}
