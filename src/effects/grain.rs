use crate::foundation::error::{FilmError, FilmResult};
use crate::foundation::math::round_clamp_u8;
use crate::foundation::rng::RandomSource;
use crate::raster::buffer::RasterBuffer;

/// Add Gaussian film grain with standard deviation `intensity * 255`.
///
/// Noise is drawn per color channel in row-major, channel-interleaved order. The alpha
/// channel of an RGBA image is copied unchanged and consumes no draws. An intensity of 0
/// returns a copy without touching `rng`.
pub fn add_grain<R: RandomSource + ?Sized>(
    image: &RasterBuffer,
    intensity: f64,
    rng: &mut R,
) -> FilmResult<RasterBuffer> {
    if !intensity.is_finite() || !(0.0..=1.0).contains(&intensity) {
        return Err(FilmError::invalid_argument(format!(
            "grain intensity must be within [0, 1], got {intensity}"
        )));
    }
    if intensity == 0.0 {
        return Ok(image.clone());
    }

    let stddev = intensity * 255.0;
    let ch = image.channels();
    let noisy = image.layout().color_channels();
    let mut out = image.clone();
    for px in out.data_mut().chunks_exact_mut(ch) {
        for v in &mut px[..noisy] {
            *v = round_clamp_u8(f64::from(*v) + rng.next_gaussian(0.0, stddev));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/grain.rs"]
mod tests;
