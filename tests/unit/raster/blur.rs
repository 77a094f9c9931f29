use super::*;
use crate::raster::buffer::ChannelLayout;

#[test]
fn blur_radius_0_is_identity() {
    let src = RasterBuffer::from_raw(1, 2, ChannelLayout::Rgba, vec![1, 2, 3, 4, 5, 6, 7, 8])
        .unwrap();
    let out = GaussianBlur.gaussian_blur(&src, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    for (layout, px) in [
        (ChannelLayout::Luma, vec![77u8]),
        (ChannelLayout::Rgb, vec![10u8, 20, 30]),
        (ChannelLayout::Rgba, vec![10u8, 20, 30, 40]),
    ] {
        let src = RasterBuffer::filled(4, 3, layout, &px).unwrap();
        let out = GaussianBlur.gaussian_blur(&src, 2.0).unwrap();
        assert_eq!(out, src);
    }
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let mut src = RasterBuffer::filled(5, 5, ChannelLayout::Luma, &[0]).unwrap();
    src.pixel_mut(2, 2)[0] = 255;

    let out = GaussianBlur.gaussian_blur(&src, 0.7).unwrap();

    let nonzero = out.data().iter().filter(|&&v| v != 0).count();
    assert!(nonzero > 1);

    let sum: u32 = out.data().iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 8);
}

#[test]
fn negligible_radius_leaves_pixels_untouched() {
    let mut src = RasterBuffer::filled(6, 6, ChannelLayout::Luma, &[10]).unwrap();
    src.pixel_mut(3, 3)[0] = 200;
    let out = GaussianBlur.gaussian_blur(&src, 1e-6).unwrap();
    assert_eq!(out, src);
}

#[test]
fn negative_or_nan_radius_is_rejected() {
    let src = RasterBuffer::filled(2, 2, ChannelLayout::Luma, &[0]).unwrap();
    assert!(matches!(
        GaussianBlur.gaussian_blur(&src, -1.0),
        Err(FilmError::InvalidArgument(_))
    ));
    assert!(GaussianBlur.gaussian_blur(&src, f64::NAN).is_err());
}

#[test]
fn kernel_weights_sum_to_q16_one() {
    for sigma in [0.3, 1.0, 4.5, 20.0] {
        let k = gaussian_kernel_q16(sigma).unwrap();
        assert_eq!(k.len() % 2, 1);
        assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
    }
}

#[test]
fn box_widths_track_sigma() {
    assert_eq!(box_widths(8.5).unwrap(), [17, 17, 17]);
    assert_eq!(box_widths(10.0).unwrap(), [19, 19, 21]);
    assert_eq!(box_widths(25.0).unwrap(), [49, 49, 51]);
    for sigma in [9.0, 13.7, 40.0, 120.0] {
        let var: f64 = box_widths(sigma)
            .unwrap()
            .iter()
            .map(|&w| ((w * w) as f64 - 1.0) / 12.0)
            .sum();
        assert!((var.sqrt() - sigma).abs() / sigma < 0.05, "sigma {sigma} -> {var}");
    }
}

#[test]
fn wide_blur_keeps_constant_image() {
    let src = RasterBuffer::filled(30, 20, ChannelLayout::Rgba, &[10, 120, 250, 77]).unwrap();
    let out = GaussianBlur.gaussian_blur(&src, 30.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn wide_blur_matches_exact_kernel_on_an_edge() {
    for sigma in [10.0, 25.0] {
        let w = (12.0 * sigma) as u32;
        let mut src = RasterBuffer::filled(w, 3, ChannelLayout::Luma, &[0]).unwrap();
        for y in 0..3 {
            for x in w / 2..w {
                src.pixel_mut(x, y)[0] = 255;
            }
        }

        let exact = kernel_blur(&src, sigma).unwrap();
        let fast = GaussianBlur.gaussian_blur(&src, sigma).unwrap();
        assert_eq!(fast, box_blur(&src, sigma).unwrap());

        let worst = exact
            .data()
            .iter()
            .zip(fast.data())
            .map(|(&a, &b)| (i32::from(a) - i32::from(b)).abs())
            .max()
            .unwrap();
        assert!(worst <= 4, "sigma {sigma}: max diff {worst}");
        assert!(fast.pixel(w / 2 - 1, 1)[0] > 100 && fast.pixel(w / 2, 1)[0] < 155);
    }
}
