#![allow(dead_code)]

use std::any::Any;
use std::path::PathBuf;

use pcell::data::PcellCtx;
use pcell::layout::layers::{LayerInfo, LayerType, Layers};
use pcell::pdk::{Pdk, Units};
use pcell::units::SiPrefix;

pub mod frame;

pub const BUILD_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/build");

pub fn out_path(test_name: &str, file_name: &str) -> PathBuf {
    PathBuf::from(BUILD_DIR).join(format!("tests/{test_name}/{file_name}"))
}

const LAYERS: &str = "layernum,datatype,name,purpose
8,0,Metal1,drawing
8,22,Metal1,filler
8,25,Metal1,text
10,0,Metal2,drawing
";

/// A two-metal PDK on a 5 nm grid.
pub struct TestPdk;

impl Pdk for TestPdk {
    fn name(&self) -> &'static str {
        "test"
    }

    fn process(&self) -> &'static str {
        "test"
    }

    fn lengths(&self) -> Units {
        Units::new(SiPrefix::Nano)
    }

    fn layers(&self) -> Layers {
        Layers::from_csv(LAYERS, |name| match name {
            "Metal1" => LayerInfo::builder()
                .metal_idx(1)
                .layer_type(LayerType::Metal)
                .build()
                .unwrap(),
            "Metal2" => LayerInfo::builder()
                .metal_idx(2)
                .layer_type(LayerType::Metal)
                .build()
                .unwrap(),
            _ => LayerInfo::default(),
        })
        .unwrap()
    }

    fn layout_grid(&self) -> i64 {
        5
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn setup_ctx() -> PcellCtx {
    PcellCtx::new(TestPdk)
}
