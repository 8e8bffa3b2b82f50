use pcell::error::{ErrorContext, ErrorSource};
use pcell::layout::layers::{GdsLayerSpec, LayerPurpose, LayerSpec};
use pcell::units::Distance;
use pcellgeom::bbox::BoundBox;
use pcellgeom::orientation::Named;
use pcellgeom::{Point, Rect};
use sg13g2_pdk::sealring::{SealRing, SealRingParams};
use sg13g2_pdk::Sg13g2Pdk;

mod common;
use common::{is_symmetric, out_path, overlaps, setup_ctx, BarePdk};

fn params(l: i64, w: i64, wfill: i64) -> SealRingParams {
    SealRingParams {
        l: Distance::from_nm(l),
        w: Distance::from_nm(w),
        wfill: Distance::from_nm(wfill),
        ..Default::default()
    }
}

#[test]
fn test_generate_default_sealring() {
    let ctx = setup_ctx();
    let cell = ctx
        .generate_layout::<SealRing>(&SealRingParams::default())
        .unwrap();
    assert_eq!(cell.name().as_str(), "sealring");

    let report = ctx.layer_report(&cell);
    let count = |name: &str| {
        report
            .iter()
            .find(|(layer, _)| layer == name)
            .map(|(_, count)| *count)
    };
    // Four corners and four straight segments per layer.
    for layer in ["Passiv", "Activ", "pSD", "EdgeSeal", "Metal3", "TopMetal2", "Cont", "Via4", "TopVia2"] {
        assert_eq!(count(&format!("{layer}/drawing")), Some(8), "{layer}");
    }
    assert!(count("Metal1/filler").unwrap() > 28);
    assert!(count("GatPoly/filler").unwrap() > 0);
    assert_eq!(count("Metal1/slit"), None);
    assert_eq!(cell.annotations().count(), 0);

    // Everything but the fillers stays inside the cell.
    let outline = Rect::from_coords(0, 0, 150_000, 150_000);
    for elem in cell.elems() {
        if *elem.layer.purpose() != LayerPurpose::Filler {
            let bbox = elem.brect().unwrap();
            assert!(outline.contains_rect(&bbox), "{bbox:?} leaves the cell");
        }
    }
}

#[test]
fn test_sealring_is_symmetric() {
    let ctx = setup_ctx();
    let mut rect_params = params(200_000, 160_000, 30_000);
    rect_params.add_slit = true;
    let cell = ctx.generate_layout::<SealRing>(&rect_params).unwrap();
    assert!(is_symmetric(&ctx, &cell, Point::new(200_000, 160_000), Named::R180));
    assert!(!is_symmetric(&ctx, &cell, Point::new(200_000, 0), Named::R90));

    let mut square = params(150_000, 150_000, 0);
    square.add_slit = true;
    let cell = ctx.generate_layout::<SealRing>(&square).unwrap();
    assert!(is_symmetric(&ctx, &cell, Point::new(150_000, 150_000), Named::R180));
    assert!(is_symmetric(&ctx, &cell, Point::new(150_000, 0), Named::R90));
}

#[test]
fn test_fillers_never_touch_the_ring() {
    let ctx = setup_ctx();
    for (l, w, wfill) in [
        (150_000, 150_000, 30_000),
        (200_000, 160_000, 30_000),
        (180_000, 250_000, 10_000),
        (300_000, 170_000, 45_000),
        (150_000, 150_000, 1_000),
    ] {
        let cell = ctx
            .generate_layout::<SealRing>(&params(l, w, wfill))
            .unwrap();
        let fillers: Vec<_> = cell
            .elems()
            .filter(|e| *e.layer.purpose() == LayerPurpose::Filler)
            .collect();
        assert!(!fillers.is_empty());
        for filler in fillers {
            let tile = filler.inner.as_rect().unwrap();
            for band in cell.elems_on(&LayerSpec::drawing(filler.layer.layer())) {
                assert!(
                    !overlaps(&band.inner, &tile),
                    "{l} x {w}, wfill {wfill}: filler {tile:?} overlaps {:?}",
                    band.inner
                );
            }
        }
    }
}

#[test]
fn test_no_fillers_without_filler_band() {
    let ctx = setup_ctx();
    let cell = ctx
        .generate_layout::<SealRing>(&params(180_000, 150_000, 0))
        .unwrap();
    assert!(cell
        .elems()
        .all(|e| *e.layer.purpose() == LayerPurpose::Drawing));
    assert_eq!(cell.len(), 18 * 8);
    assert_eq!(cell.brect(), Some(Rect::from_coords(0, 0, 180_000, 150_000)));
}

#[test]
fn test_label_and_slits() {
    let ctx = setup_ctx();
    let mut params = params(150_000, 150_000, 0);
    params.add_label = true;
    params.add_slit = true;
    let cell = ctx.generate_layout::<SealRing>(&params).unwrap();

    let labels: Vec<_> = cell.annotations().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].string.as_str(), "sub!");
    assert_eq!(labels[0].loc, Point::new(75_000, 9_300));
    let m1 = ctx.layers().get_key("Metal1").unwrap();
    assert_eq!(labels[0].layer, LayerSpec::label(m1));

    // Four slits per side on each of the seven metals.
    let slits = cell.elems_on(&LayerSpec::slit(m1)).count();
    assert_eq!(slits, 16);
    let slit_total = cell
        .elems()
        .filter(|e| *e.layer.purpose() == LayerPurpose::Slit)
        .count();
    assert_eq!(slit_total, 16 * 7);
}

#[test]
fn test_sealring_gds_round_trip() {
    let ctx = setup_ctx();
    let path = out_path("test_sealring_gds_round_trip", "sealring.gds");
    let params = SealRingParams {
        add_label: true,
        ..Default::default()
    };
    let cell = ctx.write_layout::<SealRing>(&params, &path).unwrap();

    let lib = gds21::GdsLibrary::load(&path).expect("GDS file should load");
    assert_eq!(lib.structs.len(), 1);
    let strukt = &lib.structs[0];
    assert_eq!(strukt.name, "sealring");

    let passiv = GdsLayerSpec(9, 0);
    let mut boundaries = 0;
    let mut passiv_corners = 0;
    let mut texts = Vec::new();
    for elem in strukt.elems.iter() {
        match elem {
            gds21::GdsElement::GdsBoundary(b) => {
                boundaries += 1;
                assert_eq!(b.xy.first(), b.xy.last(), "boundaries should be closed");
                if (b.layer, b.datatype) == (passiv.0, passiv.1) && b.xy.len() > 5 {
                    passiv_corners += 1;
                }
            }
            gds21::GdsElement::GdsTextElem(t) => {
                texts.push((t.string.clone(), t.layer, t.texttype))
            }
            other => panic!("unexpected element {other:?}"),
        }
    }
    assert_eq!(boundaries, cell.len());
    assert_eq!(passiv_corners, 4);
    assert_eq!(texts, vec![("sub!".to_string(), 8, 25)]);
}

#[test]
fn test_write_sealring_into_temp_dir() {
    let ctx = setup_ctx();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/sealring.gds");
    ctx.write_layout::<SealRing>(&params(150_000, 150_000, 0), &path)
        .unwrap();
    assert!(path.exists());
}

#[test]
fn test_rejects_small_sealring() {
    let ctx = setup_ctx();
    let err = ctx
        .generate_layout::<SealRing>(&params(100_000, 150_000, 30_000))
        .unwrap_err();
    assert!(matches!(err.source(), ErrorSource::InvalidArgs(_)));
    assert!(matches!(
        err.context().first(),
        Some(ErrorContext::InitComponent { .. })
    ));
    assert!(format!("{err}").contains("l = 100u is below the minimum of 150u"));
}

#[test]
fn test_rejects_sealring_beyond_gds_range() {
    let ctx = setup_ctx();
    let err = ctx
        .generate_layout::<SealRing>(&params(150_000, 150_000, 2_147_483_645))
        .unwrap_err();
    assert!(matches!(err.source(), ErrorSource::InvalidArgs(_)));
    assert!(format!("{err}").contains("exceeds the GDS coordinate range"));

    assert!(toml::from_str::<SealRingParams>("wfill = \"1e300\"").is_err());
}

#[test]
fn test_rejects_foreign_pdk() {
    let ctx = pcell::data::PcellCtx::new(BarePdk);
    let err = ctx
        .generate_layout::<SealRing>(&SealRingParams::default())
        .unwrap_err();
    assert!(matches!(err.source(), ErrorSource::InvalidPdk(_)));
}

#[test]
fn test_off_grid_params_are_snapped() {
    let ctx = setup_ctx();
    let params: SealRingParams =
        toml::from_str("l = \"150.002u\"\nw = \"160.004u\"\nwfill = 0\n").unwrap();
    let cell = ctx.generate_layout::<SealRing>(&params).unwrap();
    assert_eq!(cell.brect(), Some(Rect::from_coords(0, 0, 150_000, 160_005)));
}

#[test]
fn test_tech_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let tech = dir.path().join("tech.toml");
    std::fs::write(&tech, "[sealring]\nlabel = \"vss!\"\ncorner_end = 30.0\n").unwrap();

    let ctx = pcell::data::PcellCtx::new(Sg13g2Pdk::with_tech_file(&tech).unwrap());
    let mut params = params(150_000, 150_000, 0);
    params.add_label = true;
    let cell = ctx.generate_layout::<SealRing>(&params).unwrap();

    let label = cell.annotations().next().unwrap();
    assert_eq!(label.string.as_str(), "vss!");

    let passiv = ctx.layers().get_key("Passiv").unwrap();
    let bottom = cell
        .elems_on(&LayerSpec::drawing(passiv))
        .filter_map(|e| e.inner.as_rect())
        .find(|r| r.bottom() == 0)
        .unwrap();
    assert_eq!(bottom, Rect::from_coords(30_000, 0, 120_000, 4_200));

    std::fs::write(&tech, "[sealring]\ncorner_width = 0\n").unwrap();
    assert!(Sg13g2Pdk::with_tech_file(&tech).is_err());
}
