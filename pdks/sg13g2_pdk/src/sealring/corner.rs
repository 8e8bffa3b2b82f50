//! Chamfered corners and straight ring segments.

use pcell::error::Result;
use pcell::layout::group::Group;
use pcell::layout::layers::{LayerKey, LayerSpec};
use pcellgeom::Side;

use super::geometry::SealRingGeometry;
use super::SealRingLayers;

/// Every band of the ring as `(layer, inset, width)`, passivation first.
fn bands<'a>(
    g: &'a SealRingGeometry,
    layers: &'a SealRingLayers,
) -> impl Iterator<Item = (LayerKey, i64, i64)> + 'a {
    std::iter::once((layers.passiv, 0, g.cw))
        .chain(layers.ring.iter().map(move |&key| (key, g.mo, g.cw)))
        .chain(layers.vias.iter().map(move |&(key, width)| (key, g.vi, width)))
}

/// The lower-left corner: one staircase per layer.
pub(crate) fn corner_group(g: &SealRingGeometry, layers: &SealRingLayers) -> Result<Group> {
    let mut group = Group::new();
    for (layer, inset, width) in bands(g, layers) {
        let poly = g.staircase(inset, width).polygon()?;
        group.add_polygon(LayerSpec::drawing(layer), poly);
    }
    Ok(group)
}

/// Straight segments on all four sides, trimmed back to the corners.
pub(crate) fn straight_segments(g: &SealRingGeometry, layers: &SealRingLayers) -> Result<Group> {
    let mut group = Group::new();
    for (layer, inset, width) in bands(g, layers) {
        let ring = g.ring(inset, width)?;
        for side in Side::ALL {
            if let Some(rect) = ring.segment(side, g.straight_span(side)) {
                group.add_rect(LayerSpec::drawing(layer), rect);
            }
        }
    }
    Ok(group)
}
