use super::*;

#[test]
fn light_leak_presets_resolve_by_index_and_name() {
    for (i, preset) in LightLeakPreset::ALL.into_iter().enumerate() {
        let index = i as u32 + 1;
        assert_eq!(LightLeakPreset::from_index(index).unwrap(), preset);
        assert_eq!(preset.index(), index);
        assert_eq!(preset.name().parse::<LightLeakPreset>().unwrap(), preset);
        assert_eq!(index.to_string().parse::<LightLeakPreset>().unwrap(), preset);
        preset.config().validate().unwrap();
    }
}

#[test]
fn light_leak_index_out_of_range_fails() {
    for bad in [0, 6, 100] {
        assert!(matches!(
            LightLeakPreset::from_index(bad),
            Err(FilmError::InvalidArgument(_))
        ));
    }
    assert!("sunburst".parse::<LightLeakPreset>().is_err());
}

#[test]
fn nice_preset_values() {
    let cfg = LightLeakPreset::Nice.config();
    assert_eq!(cfg.max_radius, 1000);
    assert_eq!(cfg.figure_count, 200);
    assert_eq!(cfg.offset, Offset { x: 100, y: 50 });
    assert_eq!(cfg.max_transparency, 250);
    assert!(!cfg.use_lines);
    assert!(LightLeakPreset::ClearLinesDense.config().use_lines);
}

#[test]
fn vignette_presets_resolve_by_index_and_name() {
    for (i, preset) in VignettePreset::ALL.into_iter().enumerate() {
        assert_eq!(VignettePreset::from_index(i as u32).unwrap(), preset);
        assert_eq!(preset.index(), i as u32);
        assert_eq!(preset.name().parse::<VignettePreset>().unwrap(), preset);
        preset.config().validate().unwrap();
    }
    assert!(VignettePreset::from_index(3).is_err());
    assert_eq!(VignettePreset::Round.config().frame, FrameShape::Round);
    assert_eq!(VignettePreset::Round.config().transparency, 120);
}

#[test]
fn tint_presets_parse() {
    assert_eq!("Brown".parse::<TintPreset>().unwrap().config(), TintConfig::BROWN);
    assert_eq!("blue".parse::<TintPreset>().unwrap(), TintPreset::Blue);
    assert!("green".parse::<TintPreset>().is_err());
}

#[test]
fn presets_serialize_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&LightLeakPreset::RollersTraceDense).unwrap(),
        "\"rollers_trace_dense\""
    );
    let p: VignettePreset = serde_json::from_str("\"pale_rect\"").unwrap();
    assert_eq!(p, VignettePreset::PaleRect);
}
