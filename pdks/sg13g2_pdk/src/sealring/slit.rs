//! Stress-relief slits in the metal band.

use pcell::error::Result;
use pcell::layout::group::Group;
use pcell::layout::layers::LayerSpec;
use pcellgeom::{snap_to_grid, Side, Span};

use super::geometry::SealRingGeometry;
use super::SealRingLayers;
use crate::tech::SealRingTech;

/// Evenly spaced runs of `length` along `span`, separated by `space` and centered.
///
/// At least `space` is left clear at both ends of `span`.
pub fn slit_spans(span: Span, length: i64, space: i64, grid: i64) -> Vec<Span> {
    let pitch = length + space;
    if pitch <= 0 {
        return Vec::new();
    }
    let count = (span.length() - space).div_euclid(pitch);
    if count <= 0 {
        return Vec::new();
    }
    let run = count * pitch - space;
    let start = snap_to_grid(span.start() + (span.length() - run) / 2, grid);
    (0..count)
        .map(|i| Span::with_start_and_length(start + i * pitch, length))
        .collect()
}

/// Slits on the bottom and left segments of every metal layer.
pub(crate) fn slit_group(
    g: &SealRingGeometry,
    tech: &SealRingTech,
    layers: &SealRingLayers,
    grid: i64,
) -> Result<Group> {
    let lane = g.ring(g.mo + tech.slit_inset.nm(), tech.slit_width.nm())?;
    let mut group = Group::new();
    for side in [Side::Bot, Side::Left] {
        let Some(segment) = lane.segment(side, g.straight_span(side)) else {
            continue;
        };
        let dir = side.edge_dir();
        let spans = slit_spans(
            segment.span(dir),
            tech.slit_length.nm(),
            tech.slit_space.nm(),
            grid,
        );
        for span in spans {
            let slit = segment.with_span(span, dir);
            for metal in layers.metals() {
                group.add_rect(LayerSpec::slit(metal), slit);
            }
        }
    }
    Ok(group)
}
