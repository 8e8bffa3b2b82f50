/// The SG13G2 layout grid, in nanometers.
pub const LAYOUT_GRID: i64 = 5;

/// Layers drawn as the full-width seal ring band.
pub const RING_LAYERS: [&str; 10] = [
    "Activ",
    "pSD",
    "EdgeSeal",
    "Metal1",
    "Metal2",
    "Metal3",
    "Metal4",
    "Metal5",
    "TopMetal1",
    "TopMetal2",
];

/// Via layers drawn as narrow bars inside the ring band, bottom up.
pub const VIA_LAYERS: [&str; 7] = ["Cont", "Via1", "Via2", "Via3", "Via4", "TopVia1", "TopVia2"];

/// Thin metals that get the small metal filler recipe.
pub const FILL_METALS: [&str; 5] = ["Metal1", "Metal2", "Metal3", "Metal4", "Metal5"];

pub const TOP_METALS: [&str; 2] = ["TopMetal1", "TopMetal2"];

pub const PASSIVATION: &str = "Passiv";

pub const ACTIVE: &str = "Activ";

pub const POLY: &str = "GatPoly";

/// Layer carrying the optional label.
pub const LABEL_LAYER: &str = "Metal1";
