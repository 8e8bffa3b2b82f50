use std::any::Any;
use std::path::Path;

use pcell::error::Result;
use pcell::layout::layers::Layers;
use pcell::pdk::{Pdk, Units};
use pcell::units::SiPrefix;

use self::tech::TechParams;

pub mod constants;
pub mod layers;
pub mod sealring;
pub mod tech;

pub(crate) mod log;

/// The IHP SG13G2 130 nm BiCMOS process.
#[derive(Debug, Clone)]
pub struct Sg13g2Pdk {
    tech: TechParams,
    layers: Layers,
}

impl Sg13g2Pdk {
    /// Creates the PDK with the embedded technology parameters.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tech: TechParams::embedded()?,
            layers: Self::load_layers()?,
        })
    }

    /// Creates the PDK, overriding technology parameters from a TOML file.
    pub fn with_tech_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut pdk = Self::new()?;
        pdk.tech = pdk.tech.with_override_file(path)?;
        Ok(pdk)
    }

    #[inline]
    pub fn tech(&self) -> &TechParams {
        &self.tech
    }
}

impl Pdk for Sg13g2Pdk {
    fn name(&self) -> &'static str {
        "sg13g2"
    }

    fn process(&self) -> &'static str {
        "sg13g2"
    }

    fn lengths(&self) -> Units {
        Units::new(SiPrefix::Nano)
    }

    fn layers(&self) -> Layers {
        self.layers.clone()
    }

    /// The grid resolution in SG13G2 is 5 nanometers.
    fn layout_grid(&self) -> i64 {
        constants::LAYOUT_GRID
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
