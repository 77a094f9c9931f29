use crate::effects::composite::mask_over_black;
use crate::foundation::core::{BBox, Dims};
use crate::foundation::error::{FilmError, FilmResult};
use crate::raster::blur::{BlurOperator, GaussianBlur};
use crate::raster::buffer::{ChannelLayout, RasterBuffer};
use crate::raster::shapes::{CpuRasterizer, ShapeRasterizer};
use std::str::FromStr;

/// Outline of the bright region of a vignette mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameShape {
    /// Rectangle (optionally with rounded corners).
    Rect,
    /// Ellipse.
    Round,
}

impl FromStr for FrameShape {
    type Err = FilmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" => Ok(Self::Rect),
            "round" => Ok(Self::Round),
            other => Err(FilmError::invalid_argument(format!(
                "unknown vignette frame '{other}'"
            ))),
        }
    }
}

/// Parameters of the vignette mask.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VignetteConfig {
    /// Frame width as a fraction of half the image width, in `(0, 1)`.
    pub size_fraction: f64,
    /// Mask value outside the frame shape; 0 is fully dark.
    pub transparency: u8,
    /// Mask value inside the frame shape; higher is brighter.
    pub brightness: u8,
    /// Divisor of the blur radius; lower values give a softer edge.
    pub density: f64,
    /// Frame outline.
    pub frame: FrameShape,
    /// Corner radius in pixels for [`FrameShape::Rect`].
    pub corner_radius: f64,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            size_fraction: 0.1,
            transparency: 0,
            brightness: 150,
            density: 60.0,
            frame: FrameShape::Rect,
            corner_radius: 0.0,
        }
    }
}

impl VignetteConfig {
    /// Check value ranges.
    pub fn validate(&self) -> FilmResult<()> {
        if !(self.size_fraction > 0.0 && self.size_fraction < 1.0) {
            return Err(FilmError::invalid_argument(format!(
                "vignette size_fraction must be within (0, 1), got {}",
                self.size_fraction
            )));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(FilmError::invalid_argument(format!(
                "vignette density must be > 0, got {}",
                self.density
            )));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(FilmError::invalid_argument(format!(
                "vignette corner_radius must be >= 0, got {}",
                self.corner_radius
            )));
        }
        Ok(())
    }

    /// Half-extent of the frame shape for an image `width` pixels wide.
    pub fn frame_radius(&self, width: u32) -> i64 {
        (f64::from(width) / 2.0 * (1.0 - self.size_fraction)).floor() as i64
    }
}

/// Build the Luma vignette mask for an image of `dims` with the default CPU backends.
pub fn generate_vignette_mask(dims: Dims, cfg: &VignetteConfig) -> FilmResult<RasterBuffer> {
    generate_vignette_mask_with(dims, cfg, &mut CpuRasterizer::new(), &GaussianBlur)
}

/// Build the Luma vignette mask using explicit drawing and blur backends.
#[tracing::instrument(skip(rasterizer, blur))]
pub fn generate_vignette_mask_with(
    dims: Dims,
    cfg: &VignetteConfig,
    rasterizer: &mut dyn ShapeRasterizer,
    blur: &dyn BlurOperator,
) -> FilmResult<RasterBuffer> {
    cfg.validate()?;
    let dims = Dims::new(dims.width, dims.height)?;

    let radius = cfg.frame_radius(dims.width);
    let mut mask = RasterBuffer::filled(
        dims.width,
        dims.height,
        ChannelLayout::Luma,
        &[cfg.transparency],
    )?;
    let bbox = BBox::centered(
        i64::from(dims.width / 2),
        i64::from(dims.height / 2),
        radius,
    );
    match cfg.frame {
        FrameShape::Rect => {
            rasterizer.draw_rounded_rect(&mut mask, bbox, cfg.corner_radius, &[cfg.brightness])?
        }
        FrameShape::Round => rasterizer.draw_ellipse(&mut mask, bbox, &[cfg.brightness])?,
    }

    let blur_radius = radius as f64 / cfg.density;
    tracing::debug!(radius, blur_radius, "vignette frame drawn");
    blur.gaussian_blur(&mask, blur_radius)
}

/// Darken `image` toward black wherever `mask` is below 255.
pub fn apply_vignette(image: &RasterBuffer, mask: &RasterBuffer) -> FilmResult<RasterBuffer> {
    mask_over_black(image, mask)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/vignette.rs"]
mod tests;
