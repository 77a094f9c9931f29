use crate::foundation::error::{FilmError, FilmResult};
use crate::foundation::math::{mul_div255_u8, round_clamp_u8};
use crate::raster::buffer::{ChannelLayout, RasterBuffer};

/// Scale an 8-bit value by an 8-bit opacity, i.e. composite it over black.
pub fn over_black(value: u8, opacity: u8) -> u8 {
    mul_div255_u8(u16::from(value), u16::from(opacity))
}

/// Linear interpolation `a + weight * (b - a)`, rounded and clamped.
pub fn mix(a: u8, b: u8, weight: f64) -> u8 {
    let (a, b) = (f64::from(a), f64::from(b));
    round_clamp_u8(a + weight * (b - a))
}

/// Use a Luma `mask` as per-pixel opacity for `image` over an opaque black canvas.
///
/// A mask value of 255 keeps the pixel, 0 yields black. The result is RGB; the alpha channel
/// of an RGBA image does not take part.
pub fn mask_over_black(image: &RasterBuffer, mask: &RasterBuffer) -> FilmResult<RasterBuffer> {
    image.ensure_color("mask_over_black")?;
    if mask.layout() != ChannelLayout::Luma {
        return Err(FilmError::invalid_argument(format!(
            "opacity mask must be Luma, got {:?}",
            mask.layout()
        )));
    }
    image.ensure_same_dims(mask.dims())?;

    let ch = image.channels();
    let mut out = Vec::with_capacity(image.dims().pixel_count() * 3);
    for (px, &m) in image.data().chunks_exact(ch).zip(mask.data()) {
        out.extend(px[..3].iter().map(|&c| over_black(c, m)));
    }
    RasterBuffer::from_raw(image.width(), image.height(), ChannelLayout::Rgb, out)
}

/// Flatten a straight-alpha RGBA layer onto opaque black.
///
/// RGB layers are already opaque and are returned unchanged.
pub fn flatten_onto_black(layer: &RasterBuffer) -> FilmResult<RasterBuffer> {
    match layer.layout() {
        ChannelLayout::Rgb => Ok(layer.clone()),
        ChannelLayout::Rgba => {
            let mut out = Vec::with_capacity(layer.dims().pixel_count() * 3);
            for px in layer.data().chunks_exact(4) {
                let a = px[3];
                out.extend(px[..3].iter().map(|&c| over_black(c, a)));
            }
            RasterBuffer::from_raw(layer.width(), layer.height(), ChannelLayout::Rgb, out)
        }
        ChannelLayout::Luma => Err(FilmError::invalid_argument(
            "flatten_onto_black expects an RGB or RGBA layer",
        )),
    }
}

/// Blend the color channels of `overlay` into `base` with `weight` in `[0, 1]`.
///
/// `weight = 0` returns `base`, `weight = 1` the overlay colors. An RGBA base keeps its alpha.
pub fn blend(
    base: &RasterBuffer,
    overlay: &RasterBuffer,
    weight: f64,
) -> FilmResult<RasterBuffer> {
    if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
        return Err(FilmError::invalid_argument(format!(
            "blend weight must be within [0, 1], got {weight}"
        )));
    }
    base.ensure_color("blend")?;
    overlay.ensure_color("blend")?;
    base.ensure_same_dims(overlay.dims())?;

    let mut out = base.clone();
    let (bc, oc) = (base.channels(), overlay.channels());
    for (dst, src) in out
        .data_mut()
        .chunks_exact_mut(bc)
        .zip(overlay.data().chunks_exact(oc))
    {
        for i in 0..3 {
            dst[i] = mix(dst[i], src[i], weight);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
