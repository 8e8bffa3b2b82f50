//! The SG13G2 seal ring.
//!
//! The ring is built from one chamfered corner, drawn four times, and four
//! straight segments per layer. Optional filler arrays, a label and metal
//! slits are added on request.

use arcstr::ArcStr;
use pcell::component::Component;
use pcell::data::PcellCtx;
use pcell::error::{ErrorSource, Result};
use pcell::layout::cell::TextElement;
use pcell::layout::context::LayoutCtx;
use pcell::layout::layers::selector::Selector;
use pcell::layout::layers::{LayerKey, LayerSpec, Layers};
use pcell::units::Distance;
use pcellgeom::orientation::Named;
use pcellgeom::{is_on_grid, snap_to_grid, Point};
use serde::{Deserialize, Serialize};

use self::geometry::SealRingGeometry;
use crate::constants::{
    ACTIVE, FILL_METALS, LABEL_LAYER, PASSIVATION, POLY, RING_LAYERS, TOP_METALS, VIA_LAYERS,
};
use crate::log::{debug, info, warn};
use crate::tech::{SealRingTech, TechParams};
use crate::Sg13g2Pdk;

pub mod corner;
pub mod fill;
pub mod geometry;
pub mod slit;

/// Largest coordinate a GDS boundary can hold, in nanometers.
const MAX_EXTENT: i64 = i32::MAX as i64;

/// User parameters of the seal ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SealRingParams {
    /// Length along x.
    pub l: Distance,
    /// Width along y.
    pub w: Distance,
    /// Width of the filler band outside the ring. Zero disables fillers.
    pub wfill: Distance,
    #[serde(alias = "addLabel")]
    pub add_label: bool,
    #[serde(alias = "addSlit")]
    pub add_slit: bool,
}

impl Default for SealRingParams {
    fn default() -> Self {
        Self {
            l: Distance::from_nm(150_000),
            w: Distance::from_nm(150_000),
            wfill: Distance::from_nm(30_000),
            add_label: false,
            add_slit: false,
        }
    }
}

impl SealRingParams {
    /// Returns a copy with every length snapped to `grid`.
    pub fn snapped(&self, grid: i64) -> Self {
        let snap = |name: &str, value: Distance| {
            if is_on_grid(value.nm(), grid) {
                value
            } else {
                let snapped = Distance::from_nm(snap_to_grid(value.nm(), grid));
                warn!("{name} = {value} is off the {grid} nm grid, using {snapped}");
                snapped
            }
        };
        Self {
            l: snap("l", self.l),
            w: snap("w", self.w),
            wfill: snap("wfill", self.wfill),
            ..self.clone()
        }
    }

    fn validate(&self, tech: &SealRingTech) -> Result<()> {
        let corners = Distance::from_nm(2 * tech.corner_end.nm());
        for (name, value, min) in [("l", self.l, tech.l_min), ("w", self.w, tech.w_min)] {
            let min = min.max(corners);
            if value < min {
                return Err(ErrorSource::InvalidArgs(format!(
                    "{name} = {value} is below the minimum of {min}"
                ))
                .into());
            }
        }
        if self.wfill.nm() < 0 {
            return Err(
                ErrorSource::InvalidArgs(format!("wfill = {} is negative", self.wfill)).into(),
            );
        }
        // The fillers reach `wfill` past both ends of each side.
        let max = Distance::from_nm(MAX_EXTENT);
        for (name, value) in [("l", self.l), ("w", self.w)] {
            let extent = value
                .nm()
                .checked_add(self.wfill.nm())
                .filter(|&extent| extent <= MAX_EXTENT);
            if extent.is_none() {
                return Err(ErrorSource::InvalidArgs(format!(
                    "{name} + wfill = {value} + {} exceeds the GDS coordinate range of {max}",
                    self.wfill
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Layer keys used by the seal ring, resolved once per layout.
#[derive(Debug, Clone)]
pub(crate) struct SealRingLayers {
    pub(crate) passiv: LayerKey,
    pub(crate) ring: Vec<LayerKey>,
    /// Via layers with their bar widths.
    pub(crate) vias: Vec<(LayerKey, i64)>,
    pub(crate) active: LayerKey,
    pub(crate) poly: LayerKey,
    pub(crate) fill_metals: Vec<LayerKey>,
    pub(crate) top_metals: Vec<LayerKey>,
    pub(crate) label: LayerKey,
}

impl SealRingLayers {
    pub(crate) fn resolve(layers: &Layers, tech: &TechParams) -> Result<Self> {
        let get = |name: &str| layers.get(Selector::Name(name));
        let all = |names: &[&str]| -> Result<Vec<LayerKey>> {
            names.iter().map(|name| get(*name)).collect()
        };

        let vias = all(&VIA_LAYERS[..])?
            .into_iter()
            .map(|key| -> Result<(LayerKey, i64)> {
                let idx = layers.which_via(key)?;
                let size = tech.via_size(idx).ok_or_else(|| {
                    ErrorSource::InvalidPdk(format!("no via size for via index {idx}"))
                })?;
                Ok((key, size.nm()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            passiv: get(PASSIVATION)?,
            ring: all(&RING_LAYERS[..])?,
            vias,
            active: get(ACTIVE)?,
            poly: get(POLY)?,
            fill_metals: all(&FILL_METALS[..])?,
            top_metals: all(&TOP_METALS[..])?,
            label: get(LABEL_LAYER)?,
        })
    }

    /// Every metal layer, bottom up.
    pub(crate) fn metals(&self) -> impl Iterator<Item = LayerKey> + '_ {
        self.fill_metals.iter().chain(self.top_metals.iter()).copied()
    }
}

/// A seal ring enclosing a die of size `l` by `w`.
pub struct SealRing {
    params: SealRingParams,
    tech: TechParams,
    geometry: SealRingGeometry,
}

impl SealRing {
    #[inline]
    pub fn params(&self) -> &SealRingParams {
        &self.params
    }

    #[inline]
    pub fn geometry(&self) -> &SealRingGeometry {
        &self.geometry
    }

    fn draw_label(&self, ctx: &mut LayoutCtx, layers: &SealRingLayers) {
        let grid = ctx.layout_grid();
        let g = &self.geometry;
        let loc = Point::new(snap_to_grid(g.l / 2, grid), snap_to_grid(g.mo + g.cw / 2, grid));
        ctx.add_annotation(TextElement::new(
            self.tech.sealring.label.as_str(),
            loc,
            LayerSpec::label(layers.label),
        ));
    }
}

impl Component for SealRing {
    type Params = SealRingParams;

    fn new(params: &Self::Params, ctx: &PcellCtx) -> Result<Self> {
        let pdk = ctx.pdk();
        let sg13g2 = pdk
            .as_any()
            .downcast_ref::<Sg13g2Pdk>()
            .ok_or_else(|| {
                ErrorSource::InvalidPdk(format!(
                    "the seal ring is only available in sg13g2, not {}",
                    pdk.name()
                ))
            })?;
        let tech = sg13g2.tech().clone();

        let params = params.snapped(pdk.layout_grid());
        params.validate(&tech.sealring)?;

        let geometry = SealRingGeometry::new(
            params.l.nm(),
            params.w.nm(),
            params.wfill.nm(),
            &tech.sealring,
        );
        Ok(Self {
            params,
            tech,
            geometry,
        })
    }

    fn name(&self) -> ArcStr {
        arcstr::literal!("sealring")
    }

    fn layout(&self, ctx: &mut LayoutCtx) -> Result<()> {
        let layers = SealRingLayers::resolve(ctx.layers(), &self.tech)?;
        let g = &self.geometry;
        info!(
            "seal ring {} x {}, filler band {}",
            self.params.l, self.params.w, self.params.wfill
        );

        let corner = corner::corner_group(g, &layers)?;
        ctx.draw(corner.clone())?;
        for (loc, orientation) in g.corner_placements() {
            ctx.draw(corner.placed(loc, orientation))?;
        }
        ctx.draw(corner::straight_segments(g, &layers)?)?;

        if g.wfill > 0 {
            let fillers = fill::filler_group(g, &self.tech, &layers, ctx.layout_grid())?;
            debug!("drawing {} filler tiles per side pair", fillers.len());
            ctx.draw(fillers.clone())?;
            ctx.draw(fillers.placed(g.opposite(), Named::R180))?;
        }

        if self.params.add_label {
            self.draw_label(ctx, &layers);
        }

        if self.params.add_slit {
            let slits = slit::slit_group(g, &self.tech.sealring, &layers, ctx.layout_grid())?;
            ctx.draw(slits.clone())?;
            ctx.draw(slits.placed(g.opposite(), Named::R180))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech() -> SealRingTech {
        TechParams::embedded().unwrap().sealring
    }

    #[test]
    fn defaults_match_the_host_form() {
        let params: SealRingParams = toml::from_str("").unwrap();
        assert_eq!(params, SealRingParams::default());
        assert_eq!(params.l.nm(), 150_000);
        assert_eq!(params.wfill.nm(), 30_000);
        assert!(!params.add_label && !params.add_slit);
    }

    #[test]
    fn parses_si_strings_and_host_names() {
        let params: SealRingParams =
            toml::from_str("l = \"200u\"\nw = 180\nwfill = \"0\"\naddSlit = true\n").unwrap();
        assert_eq!(params.l.nm(), 200_000);
        assert_eq!(params.w.nm(), 180_000);
        assert_eq!(params.wfill.nm(), 0);
        assert!(params.add_slit);
        assert!(toml::from_str::<SealRingParams>("length = 1").is_err());
    }

    #[test]
    fn snaps_to_grid() {
        let params = SealRingParams {
            l: Distance::from_nm(150_002),
            w: Distance::from_nm(150_003),
            ..Default::default()
        }
        .snapped(5);
        assert_eq!(params.l.nm(), 150_000);
        assert_eq!(params.w.nm(), 150_005);
        assert_eq!(params.wfill.nm(), 30_000);
    }

    #[test]
    fn rejects_small_rings() {
        let tech = tech();
        assert!(SealRingParams::default().validate(&tech).is_ok());

        let small = SealRingParams {
            w: Distance::from_nm(149_995),
            ..Default::default()
        };
        let err = small.validate(&tech).unwrap_err();
        assert!(matches!(err.source(), ErrorSource::InvalidArgs(_)));

        // The corners alone need twice the corner end.
        let mut tech = tech;
        tech.l_min = Distance::from_nm(10_000);
        let tight = SealRingParams {
            l: Distance::from_nm(56_395),
            ..Default::default()
        };
        assert!(tight.validate(&tech).is_err());
        let fits = SealRingParams {
            l: Distance::from_nm(56_400),
            ..Default::default()
        };
        assert!(fits.validate(&tech).is_ok());
    }

    #[test]
    fn rejects_rings_beyond_gds_coordinates() {
        let tech = tech();
        let huge: SealRingParams = toml::from_str("wfill = \"2.1e-3\"").unwrap();
        assert!(huge.validate(&tech).is_ok());

        for params in [
            SealRingParams {
                wfill: Distance::from_nm(MAX_EXTENT),
                ..Default::default()
            },
            SealRingParams {
                l: Distance::from_nm(MAX_EXTENT - 10_000),
                ..Default::default()
            },
            SealRingParams {
                w: Distance::from_nm(i64::MAX),
                wfill: Distance::from_nm(i64::MAX),
                ..Default::default()
            },
        ] {
            let err = params.validate(&tech).unwrap_err();
            assert!(matches!(err.source(), ErrorSource::InvalidArgs(_)));
        }

        assert!(toml::from_str::<SealRingParams>("wfill = \"1e300\"").is_err());
        assert!(toml::from_str::<SealRingParams>("wfill = 1e300").is_err());
    }
}
