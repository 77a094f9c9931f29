use super::*;
use crate::raster::buffer::ChannelLayout;

fn gradient(w: u32, h: u32) -> RasterBuffer {
    let mut img = RasterBuffer::filled(w, h, ChannelLayout::Rgb, &[0, 0, 0]).unwrap();
    for (i, v) in img.data_mut().iter_mut().enumerate() {
        *v = (i * 37 % 256) as u8;
    }
    img
}

#[test]
fn unit_factor_is_identity() {
    let img = gradient(6, 5);
    assert_eq!(saturation(&img, 1.0).unwrap(), img);
    assert_eq!(brightness(&img, 1.0).unwrap(), img);
    assert_eq!(contrast(&img, 1.0).unwrap(), img);
    assert_eq!(sharpness(&img, 1.0).unwrap(), img);
}

#[test]
fn zero_saturation_is_gray() {
    let img = RasterBuffer::filled(2, 2, ChannelLayout::Rgb, &[255, 0, 0]).unwrap();
    let out = saturation(&img, 0.0).unwrap();
    assert_eq!(out.pixel(1, 0), &[76, 76, 76]);
}

#[test]
fn brightness_scales_and_saturates() {
    let img = RasterBuffer::filled(1, 1, ChannelLayout::Rgb, &[200, 100, 51]).unwrap();
    assert_eq!(brightness(&img, 0.5).unwrap().pixel(0, 0), &[100, 50, 26]);
    assert_eq!(brightness(&img, 2.0).unwrap().pixel(0, 0), &[255, 200, 102]);
}

#[test]
fn zero_contrast_collapses_to_mean() {
    let mut img = RasterBuffer::filled(2, 1, ChannelLayout::Rgb, &[0, 0, 0]).unwrap();
    img.pixel_mut(1, 0).copy_from_slice(&[255, 255, 255]);
    let out = contrast(&img, 0.0).unwrap();
    assert!(out.data().iter().all(|&v| v == 128));
}

#[test]
fn flat_images_ignore_contrast_and_sharpness() {
    let img = RasterBuffer::filled(5, 5, ChannelLayout::Rgb, &[100, 100, 100]).unwrap();
    assert_eq!(contrast(&img, 1.6).unwrap(), img);
    assert_eq!(sharpness(&img, 3.0).unwrap(), img);
}

#[test]
fn zero_sharpness_smooths_interior_only() {
    let mut img = RasterBuffer::filled(3, 3, ChannelLayout::Rgb, &[0, 0, 0]).unwrap();
    img.pixel_mut(1, 1).copy_from_slice(&[255, 255, 255]);
    let out = sharpness(&img, 0.0).unwrap();
    assert_eq!(out.pixel(1, 1), &[98, 98, 98]);
    assert_eq!(out.pixel(0, 0), &[0, 0, 0]);
}

#[test]
fn alpha_survives_every_transform() {
    let img = RasterBuffer::filled(4, 4, ChannelLayout::Rgba, &[90, 140, 30, 77]).unwrap();
    for out in [
        saturation(&img, 1.3).unwrap(),
        brightness(&img, 1.1).unwrap(),
        contrast(&img, 1.6).unwrap(),
        sharpness(&img, 1.15).unwrap(),
    ] {
        assert!(out.data().chunks_exact(4).all(|px| px[3] == 77));
    }
}

#[test]
fn negative_factor_is_rejected() {
    let img = gradient(2, 2);
    assert!(matches!(
        contrast(&img, -0.5),
        Err(FilmError::InvalidArgument(_))
    ));
    assert!(brightness(&img, f64::INFINITY).is_err());
}
