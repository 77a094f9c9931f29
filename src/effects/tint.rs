use crate::foundation::error::{FilmError, FilmResult};
use crate::foundation::math::add_offset_u8;
use crate::raster::buffer::RasterBuffer;

/// Additive per-channel color shift, as fractions of the full 8-bit range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TintConfig {
    /// Red coefficient in `[-1, 1]`.
    pub red: f64,
    /// Green coefficient in `[-1, 1]`.
    pub green: f64,
    /// Blue coefficient in `[-1, 1]`.
    pub blue: f64,
}

impl TintConfig {
    /// No shift.
    pub const NEUTRAL: Self = Self::new(0.0, 0.0, 0.0);
    /// Warm brown cast.
    pub const BROWN: Self = Self::new(0.1, -0.01, -0.1);
    /// Red cast.
    pub const RED: Self = Self::new(0.1, -0.05, -0.1);
    /// Cold blue cast.
    pub const BLUE: Self = Self::new(-0.1, -0.01, 0.0);

    /// Construct from coefficients.
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Check every coefficient is finite and within `[-1, 1]`.
    pub fn validate(&self) -> FilmResult<()> {
        for (name, k) in [("red", self.red), ("green", self.green), ("blue", self.blue)] {
            if !k.is_finite() || !(-1.0..=1.0).contains(&k) {
                return Err(FilmError::invalid_argument(format!(
                    "tint {name} coefficient must be within [-1, 1], got {k}"
                )));
            }
        }
        Ok(())
    }

    /// Integer offsets added to each channel.
    pub fn offsets(&self) -> [i32; 3] {
        [self.red, self.green, self.blue].map(|k| (255.0 * k).round() as i32)
    }
}

impl Default for TintConfig {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Shift the color channels of `image` by `tint`, saturating at 0 and 255.
pub fn apply_tint(image: &RasterBuffer, tint: &TintConfig) -> FilmResult<RasterBuffer> {
    tint.validate()?;
    image.ensure_color("apply_tint")?;

    let offsets = tint.offsets();
    let mut out = image.clone();
    if offsets == [0; 3] {
        return Ok(out);
    }
    let ch = out.channels();
    for px in out.data_mut().chunks_exact_mut(ch) {
        for (v, &d) in px.iter_mut().zip(&offsets) {
            *v = add_offset_u8(*v, d);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tint.rs"]
mod tests;
