//! Off-the-shelf photo enhancement used around the artifact stages.

/// Saturation, brightness, contrast and sharpness.
pub mod adjust;
/// Aspect-preserving crop and resample.
pub mod fit;

use crate::foundation::core::Dims;
use crate::foundation::error::FilmResult;
use crate::raster::blur::{BlurOperator, GaussianBlur};
use crate::raster::buffer::RasterBuffer;

/// Enhancement transforms consumed by the film pipeline.
///
/// Factors follow the usual enhancer convention: 1 keeps the image, values below 1 weaken
/// and values above 1 strengthen the property.
pub trait Enhancer {
    /// Crop to the aspect ratio of `size` around `centering`, then resample to `size`.
    fn fit(
        &self,
        image: &RasterBuffer,
        size: Dims,
        centering: (f64, f64),
    ) -> FilmResult<RasterBuffer>;

    /// Scale color saturation.
    fn saturation(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer>;

    /// Scale brightness.
    fn brightness(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer>;

    /// Scale contrast around the mean gray level.
    fn contrast(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer>;

    /// Scale sharpness.
    fn sharpness(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer>;

    /// Gaussian blur with standard deviation `radius`.
    fn soften(&self, image: &RasterBuffer, radius: f64) -> FilmResult<RasterBuffer>;
}

/// Default [`Enhancer`]: `image` resampling, in-crate pixel transforms and the CPU blur.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageEnhancer {
    blur: GaussianBlur,
}

impl ImageEnhancer {
    /// Create the default enhancer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Enhancer for ImageEnhancer {
    fn fit(
        &self,
        image: &RasterBuffer,
        size: Dims,
        centering: (f64, f64),
    ) -> FilmResult<RasterBuffer> {
        fit::fit(image, size, centering)
    }

    fn saturation(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
        adjust::saturation(image, factor)
    }

    fn brightness(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
        adjust::brightness(image, factor)
    }

    fn contrast(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
        adjust::contrast(image, factor)
    }

    fn sharpness(&self, image: &RasterBuffer, factor: f64) -> FilmResult<RasterBuffer> {
        adjust::sharpness(image, factor)
    }

    fn soften(&self, image: &RasterBuffer, radius: f64) -> FilmResult<RasterBuffer> {
        self.blur.gaussian_blur(image, radius)
    }
}
