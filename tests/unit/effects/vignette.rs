use super::*;

struct NoBlur;

impl BlurOperator for NoBlur {
    fn gaussian_blur(&self, buf: &RasterBuffer, _radius: f64) -> FilmResult<RasterBuffer> {
        Ok(buf.clone())
    }
}

fn cfg(frame: FrameShape) -> VignetteConfig {
    VignetteConfig {
        size_fraction: 0.2,
        transparency: 30,
        brightness: 210,
        density: 8.0,
        frame,
        corner_radius: 0.0,
    }
}

fn dims(w: u32, h: u32) -> Dims {
    Dims::new(w, h).unwrap()
}

#[test]
fn frame_shape_parses_known_names() {
    assert_eq!("rect".parse::<FrameShape>().unwrap(), FrameShape::Rect);
    assert_eq!(" Round ".parse::<FrameShape>().unwrap(), FrameShape::Round);
}

#[test]
fn unknown_frame_is_invalid_argument() {
    let err = "triangle".parse::<FrameShape>().unwrap_err();
    assert!(matches!(err, FilmError::InvalidArgument(_)));

    let json = r#"{ "frame": "triangle" }"#;
    assert!(serde_json::from_str::<VignetteConfig>(json).is_err());
}

#[test]
fn frame_radius_uses_half_width() {
    let c = VignetteConfig {
        size_fraction: 0.1,
        ..VignetteConfig::default()
    };
    assert_eq!(c.frame_radius(100), 45);
    assert_eq!(c.frame_radius(1200), 540);
}

#[test]
fn mask_is_deterministic() {
    for frame in [FrameShape::Rect, FrameShape::Round] {
        let a = generate_vignette_mask(dims(64, 48), &cfg(frame)).unwrap();
        let b = generate_vignette_mask(dims(64, 48), &cfg(frame)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.layout(), ChannelLayout::Luma);
    }
}

#[test]
fn unblurred_mask_has_brightness_inside_and_transparency_outside() {
    for frame in [FrameShape::Rect, FrameShape::Round] {
        let mut rasterizer = CpuRasterizer::new();
        let mask =
            generate_vignette_mask_with(dims(60, 80), &cfg(frame), &mut rasterizer, &NoBlur)
                .unwrap();
        assert_eq!(mask.pixel(30, 40), &[210]);
        assert_eq!(mask.pixel(0, 0), &[30]);
        assert_eq!(mask.pixel(59, 79), &[30]);
        // radius = 24, so rows far above the frame keep the background value.
        assert_eq!(mask.pixel(30, 5), &[30]);
    }
}

#[test]
fn huge_density_makes_blur_negligible() {
    let c = VignetteConfig {
        density: 1e9,
        ..cfg(FrameShape::Round)
    };
    let mask = generate_vignette_mask(dims(40, 40), &c).unwrap();
    assert_eq!(mask.pixel(20, 20), &[210]);
    assert_eq!(mask.pixel(0, 0), &[30]);
}

#[test]
fn invalid_config_is_rejected() {
    let zero_density = VignetteConfig {
        density: 0.0,
        ..VignetteConfig::default()
    };
    assert!(matches!(
        generate_vignette_mask(dims(8, 8), &zero_density),
        Err(FilmError::InvalidArgument(_))
    ));

    let full_size = VignetteConfig {
        size_fraction: 1.0,
        ..VignetteConfig::default()
    };
    assert!(full_size.validate().is_err());
}

#[test]
fn vignette_darkens_edges_only() {
    let img = RasterBuffer::filled(60, 80, ChannelLayout::Rgb, &[200, 180, 160]).unwrap();
    let c = VignetteConfig {
        transparency: 0,
        brightness: 255,
        ..cfg(FrameShape::Rect)
    };
    let mask =
        generate_vignette_mask_with(img.dims(), &c, &mut CpuRasterizer::new(), &NoBlur).unwrap();
    let out = apply_vignette(&img, &mask).unwrap();
    assert_eq!(out.pixel(30, 40), &[200, 180, 160]);
    assert_eq!(out.pixel(0, 0), &[0, 0, 0]);
}
