use std::path::Path;
use std::sync::Arc;

use pcell::data::PcellCtx;
use pcell::error::Result;
use pcell::io::read_to_string;
use pcell::layout::cell::Cell;
use sg13g2_pdk::sealring::{SealRing, SealRingParams};
use sg13g2_pdk::Sg13g2Pdk;

/// Reads seal ring parameters from a TOML file.
///
/// A missing file gives the default parameters.
pub fn load_params(path: impl AsRef<Path>) -> Result<SealRingParams> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(SealRingParams::default());
    }
    let contents = read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Creates an SG13G2 context, with technology overrides if `tech` is given.
pub fn ctx(tech: Option<&Path>) -> Result<PcellCtx> {
    let pdk = match tech {
        Some(path) => Sg13g2Pdk::with_tech_file(path)?,
        None => Sg13g2Pdk::new()?,
    };
    Ok(PcellCtx::new(pdk))
}

/// Generates a seal ring and writes it to `output`.
pub fn generate(
    ctx: &PcellCtx,
    params: &SealRingParams,
    output: impl AsRef<Path>,
) -> Result<Arc<Cell>> {
    ctx.write_layout::<SealRing>(params, output)
}
