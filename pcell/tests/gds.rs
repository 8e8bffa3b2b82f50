use pcell::error::ErrorSource;
use pcell::layout::layers::{GdsLayerSpec, LayerSpec};
use pcellgeom::bbox::BoundBox;
use pcellgeom::Rect;

mod common;
use common::frame::{Frame, FrameParams};
use common::{out_path, setup_ctx};

fn params(fill: bool, label: Option<&str>) -> FrameParams {
    FrameParams {
        size: 1000,
        width: 100,
        fill,
        label: label.map(String::from),
    }
}

#[test]
fn test_generate_frame() {
    let ctx = setup_ctx();
    let cell = ctx.generate_layout::<Frame>(&params(false, None)).unwrap();

    assert_eq!(cell.name().as_str(), "frame");
    // Four trimmed sides and four corner squares.
    assert_eq!(cell.len(), 8);
    assert_eq!(cell.brect(), Some(Rect::from_coords(0, 0, 1000, 1000)));
    let report = ctx.layer_report(&cell);
    assert_eq!(report, vec![("Metal1/drawing".to_string(), 8)]);
}

#[test]
fn test_frame_gds_round_trip() {
    let ctx = setup_ctx();
    let path = out_path("test_frame_gds_round_trip", "frame.gds");
    let cell = ctx
        .write_layout::<Frame>(&params(true, Some("vss")), &path)
        .unwrap();

    let lib = gds21::GdsLibrary::load(&path).expect("GDS file should load");
    assert_eq!(lib.structs.len(), 1);
    let strukt = &lib.structs[0];
    assert_eq!(strukt.name, "frame");
    assert_eq!(strukt.elems.len(), cell.len() + 1);

    let layers = ctx.layers();
    let m1 = layers.get_key("Metal1").unwrap();
    let fill = layers.to_gds_spec(&LayerSpec::filler(m1)).unwrap();
    assert_eq!(fill, GdsLayerSpec(8, 22));

    let mut boundaries = 0;
    let mut fills = 0;
    let mut texts = Vec::new();
    for elem in strukt.elems.iter() {
        match elem {
            gds21::GdsElement::GdsBoundary(b) => {
                boundaries += 1;
                assert_eq!(b.xy.first(), b.xy.last(), "boundaries should be closed");
                if (b.layer, b.datatype) == (fill.0, fill.1) {
                    fills += 1;
                }
            }
            gds21::GdsElement::GdsTextElem(t) => texts.push(t.string.clone()),
            other => panic!("unexpected element {other:?}"),
        }
    }
    assert_eq!(boundaries, cell.len());
    // A 600x600 interior holds a 3x3 array of 100 nm tiles at a 200 nm pitch.
    assert_eq!(fills, 9);
    assert_eq!(texts, vec!["vss".to_string()]);
}

#[test]
fn test_write_layout_into_temp_dir() {
    let ctx = setup_ctx();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/dir/frame.gds");
    ctx.write_layout::<Frame>(&params(false, None), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_invalid_params_carry_context() {
    let ctx = setup_ctx();
    let err = ctx
        .generate_layout::<Frame>(&FrameParams {
            size: 100,
            width: 100,
            fill: false,
            label: None,
        })
        .unwrap_err();
    assert!(matches!(err.source(), ErrorSource::InvalidArgs(_)));
    assert!(format!("{err}").contains("while initializing component"));
}
