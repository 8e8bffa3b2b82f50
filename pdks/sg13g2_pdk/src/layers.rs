use pcell::error::Result;
use pcell::layout::layers::{LayerInfo, LayerType, Layers};

use crate::Sg13g2Pdk;

pub const LAYERS_CSV: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/layers.csv"));

fn metal_idx(name: &str) -> Option<usize> {
    match name {
        "TopMetal1" => Some(6),
        "TopMetal2" => Some(7),
        _ => name.strip_prefix("Metal")?.parse().ok(),
    }
}

fn via_idx(name: &str) -> Option<usize> {
    match name {
        "Cont" => Some(0),
        "TopVia1" => Some(5),
        "TopVia2" => Some(6),
        _ => name.strip_prefix("Via")?.parse().ok(),
    }
}

fn layer_info(name: &str) -> LayerInfo {
    let mut info = LayerInfo {
        layer_type: match name {
            "Activ" => LayerType::Diffusion,
            "GatPoly" => LayerType::Gate,
            "pSD" => LayerType::Implant,
            "Passiv" => LayerType::Passivation,
            _ => LayerType::Other,
        },
        ..Default::default()
    };
    if let Some(idx) = metal_idx(name) {
        info.metal_idx = Some(idx);
        info.layer_type = LayerType::Metal;
    } else if let Some(idx) = via_idx(name) {
        info.via_idx = Some(idx);
        info.layer_type = LayerType::Via;
    }
    info
}

impl Sg13g2Pdk {
    /// Loads the SG13G2 layer table.
    pub fn load_layers() -> Result<Layers> {
        Ok(Layers::from_csv(LAYERS_CSV, layer_info)?)
    }
}
