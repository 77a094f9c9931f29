use crate::effects::grain::add_grain;
use crate::effects::light_leak::{blend_light_leak, generate_light_leak_layer_with};
use crate::effects::tint::apply_tint;
use crate::effects::vignette::{apply_vignette, generate_vignette_mask_with};
use crate::enhance::{Enhancer, ImageEnhancer};
use crate::foundation::error::FilmResult;
use crate::foundation::rng::RandomSource;
use crate::pipeline::settings::FilmSettings;
use crate::raster::blur::GaussianBlur;
use crate::raster::buffer::RasterBuffer;
use crate::raster::shapes::CpuRasterizer;

/// Fixed sequence of enhancement and artifact stages turning a photograph into a film look.
///
/// Stage order: fit, saturation boost, brightness, soften, contrast, grain, sharpness,
/// saturation reduction, light leaks, tint, vignette. The output is RGB at
/// [`FilmSettings::output_size`].
pub struct FilmPipeline<E: Enhancer = ImageEnhancer> {
    settings: FilmSettings,
    enhancer: E,
    rasterizer: CpuRasterizer,
    blur: GaussianBlur,
}

impl FilmPipeline {
    /// Pipeline with the default enhancer.
    pub fn new(settings: FilmSettings) -> FilmResult<Self> {
        Self::with_enhancer(settings, ImageEnhancer::new())
    }
}

impl<E: Enhancer> FilmPipeline<E> {
    /// Pipeline with a custom enhancer. Settings are validated here.
    pub fn with_enhancer(settings: FilmSettings, enhancer: E) -> FilmResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            enhancer,
            rasterizer: CpuRasterizer::new(),
            blur: GaussianBlur,
        })
    }

    /// Settings this pipeline runs with.
    pub fn settings(&self) -> &FilmSettings {
        &self.settings
    }

    /// Run every stage on `image`, drawing randomness from `rng`.
    #[tracing::instrument(skip_all, fields(src = ?image.dims(), out = ?self.settings.output_size))]
    pub fn run<R: RandomSource + ?Sized>(
        &mut self,
        image: &RasterBuffer,
        rng: &mut R,
    ) -> FilmResult<RasterBuffer> {
        let s = &self.settings;
        let e = &self.enhancer;

        let img = e.fit(image, s.output_size, s.centering)?;
        let img = e.saturation(&img, s.saturation_boost)?;
        let img = e.brightness(&img, s.brightness)?;
        let img = e.soften(&img, s.soften_radius)?;
        let img = e.contrast(&img, s.contrast)?;
        tracing::debug!("enhancement done");

        let img = add_grain(&img, s.grain, rng)?;
        let img = e.sharpness(&img, s.sharpness)?;
        let img = e.saturation(&img, s.saturation_reduction)?;
        tracing::debug!(grain = s.grain, "grain done");

        let leak = s.light_leak();
        let layer = generate_light_leak_layer_with(
            img.dims(),
            &leak,
            rng,
            &mut self.rasterizer,
            &self.blur,
        )?;
        let img = blend_light_leak(&img, &layer)?;
        tracing::debug!(preset = s.light_leak_preset.name(), "light leaks done");

        let img = apply_tint(&img, &s.tint())?;

        let mask = generate_vignette_mask_with(
            img.dims(),
            &s.vignette(),
            &mut self.rasterizer,
            &self.blur,
        )?;
        let img = apply_vignette(&img, &mask)?;
        tracing::debug!(preset = s.vignette_preset.name(), "vignette done");
        Ok(img)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/film.rs"]
mod tests;
