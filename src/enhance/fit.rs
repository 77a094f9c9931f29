use crate::foundation::core::Dims;
use crate::foundation::error::{FilmError, FilmResult};
use crate::raster::buffer::RasterBuffer;
use image::imageops::FilterType;

/// Crop window `(left, top, width, height)` with the aspect ratio of `size`.
///
/// `centering` places the window inside the source: `(0, 0)` keeps the top-left corner,
/// `(0.5, 0.5)` the center.
pub fn crop_window(
    source: Dims,
    size: Dims,
    centering: (f64, f64),
) -> FilmResult<(u32, u32, u32, u32)> {
    let (cx, cy) = centering;
    if !(0.0..=1.0).contains(&cx) || !(0.0..=1.0).contains(&cy) {
        return Err(FilmError::invalid_argument(format!(
            "fit centering must be within [0, 1], got ({cx}, {cy})"
        )));
    }

    let (lw, lh) = (f64::from(source.width), f64::from(source.height));
    let live_ratio = lw / lh;
    let out_ratio = f64::from(size.width) / f64::from(size.height);
    let (cw, ch) = if live_ratio > out_ratio {
        (out_ratio * lh, lh)
    } else if live_ratio < out_ratio {
        (lw, lw / out_ratio)
    } else {
        (lw, lh)
    };

    let cw = (cw.round() as u32).clamp(1, source.width);
    let ch = (ch.round() as u32).clamp(1, source.height);
    let left = ((f64::from(source.width - cw) * cx).round() as u32).min(source.width - cw);
    let top = ((f64::from(source.height - ch) * cy).round() as u32).min(source.height - ch);
    Ok((left, top, cw, ch))
}

/// Crop `image` to the aspect ratio of `size` and resample it to exactly `size` (Lanczos3).
#[tracing::instrument(skip(image), fields(src = ?image.dims()))]
pub fn fit(image: &RasterBuffer, size: Dims, centering: (f64, f64)) -> FilmResult<RasterBuffer> {
    image.ensure_color("fit")?;
    let size = Dims::new(size.width, size.height)?;
    let (left, top, cw, ch) = crop_window(image.dims(), size, centering)?;
    if (cw, ch) == size.as_tuple() && (left, top) == (0, 0) && image.dims() == size {
        return Ok(image.clone());
    }

    let resized = image
        .to_dynamic()?
        .crop_imm(left, top, cw, ch)
        .resize_exact(size.width, size.height, FilterType::Lanczos3);
    RasterBuffer::from_dynamic(&resized)
}

#[cfg(test)]
#[path = "../../tests/unit/enhance/fit.rs"]
mod tests;
