//! Per-pixel enhancement transforms.
//!
//! Each transform builds a *degenerate* version of the image and extrapolates from it:
//! `out = degenerate + factor * (image - degenerate)`. A factor of 1 returns the image, 0 the
//! degenerate, and factors above 1 push away from it.

use crate::effects::composite::mix;
use crate::foundation::error::{FilmError, FilmResult};
use crate::raster::buffer::RasterBuffer;

/// Saturation: extrapolate from the per-pixel gray level.
pub fn saturation(image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
    check_factor("saturation", factor)?;
    image.ensure_color("saturation")?;
    let mut gray = image.clone();
    let ch = gray.channels();
    for px in gray.data_mut().chunks_exact_mut(ch) {
        let l = luma(px);
        px[..3].fill(l);
    }
    extrapolate(&gray, image, factor)
}

/// Brightness: extrapolate from black.
pub fn brightness(image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
    check_factor("brightness", factor)?;
    image.ensure_color("brightness")?;
    map_color(image, |v| mix(0, v, factor))
}

/// Contrast: extrapolate from the mean gray level of the whole image.
pub fn contrast(image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
    check_factor("contrast", factor)?;
    image.ensure_color("contrast")?;
    let ch = image.channels();
    let total: u64 = image
        .data()
        .chunks_exact(ch)
        .map(|px| u64::from(luma(px)))
        .sum();
    let mean = total as f64 / image.dims().pixel_count() as f64;
    let mean = (mean + 0.5).floor().min(255.0) as u8;
    map_color(image, |v| mix(mean, v, factor))
}

/// Sharpness: extrapolate from a 3x3 smoothed copy.
pub fn sharpness(image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
    check_factor("sharpness", factor)?;
    image.ensure_color("sharpness")?;
    extrapolate(&smooth3x3(image), image, factor)
}

/// ITU-R 601 luma of an RGB(A) pixel.
pub(crate) fn luma(px: &[u8]) -> u8 {
    let (r, g, b) = (u32::from(px[0]), u32::from(px[1]), u32::from(px[2]));
    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
}

/// Smooth color channels with `[1 1 1; 1 5 1; 1 1 1] / 13`. Border pixels are copied.
fn smooth3x3(image: &RasterBuffer) -> RasterBuffer {
    let mut out = image.clone();
    let (w, h) = (image.width(), image.height());
    if w < 3 || h < 3 {
        return out;
    }
    let ch = image.channels();
    let stride = w as usize * ch;
    let src = image.data();
    let dst = out.data_mut();
    for y in 1..(h as usize - 1) {
        for x in 1..(w as usize - 1) {
            let i = y * stride + x * ch;
            for c in 0..3 {
                let mut sum = 4 * u32::from(src[i + c]);
                for dy in [-1isize, 0, 1] {
                    for dx in [-1isize, 0, 1] {
                        let j = (i as isize + dy * stride as isize + dx * ch as isize) as usize;
                        sum += u32::from(src[j + c]);
                    }
                }
                dst[i + c] = ((sum + 6) / 13) as u8;
            }
        }
    }
    out
}

fn extrapolate(
    degenerate: &RasterBuffer,
    image: &RasterBuffer,
    factor: f64,
) -> FilmResult<RasterBuffer> {
    image.ensure_same_dims(degenerate.dims())?;
    let mut out = image.clone();
    let ch = out.channels();
    for (dst, base) in out
        .data_mut()
        .chunks_exact_mut(ch)
        .zip(degenerate.data().chunks_exact(ch))
    {
        for c in 0..3 {
            dst[c] = mix(base[c], dst[c], factor);
        }
    }
    Ok(out)
}

fn map_color(image: &RasterBuffer, f: impl Fn(u8) -> u8) -> FilmResult<RasterBuffer> {
    let mut out = image.clone();
    let ch = out.channels();
    for px in out.data_mut().chunks_exact_mut(ch) {
        for v in &mut px[..3] {
            *v = f(*v);
        }
    }
    Ok(out)
}

fn check_factor(what: &str, factor: f64) -> FilmResult<()> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(FilmError::invalid_argument(format!(
            "{what} factor must be finite and >= 0, got {factor}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/enhance/adjust.rs"]
mod tests;
