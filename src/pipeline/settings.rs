use crate::effects::light_leak::LightLeakConfig;
use crate::effects::tint::TintConfig;
use crate::effects::vignette::VignetteConfig;
use crate::foundation::core::Dims;
use crate::foundation::error::{FilmError, FilmResult};
use crate::pipeline::presets::{LightLeakPreset, TintPreset, VignettePreset};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parameters of one pipeline run.
///
/// Every field has a default, so a settings file only needs the values it changes. Explicit
/// `*_config` values take precedence over the matching preset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilmSettings {
    /// Output size after cropping and resampling.
    pub output_size: Dims,
    /// Crop window placement, `(0, 0)` top-left to `(1, 1)` bottom-right.
    pub centering: (f64, f64),
    /// Saturation factor applied first.
    pub saturation_boost: f64,
    /// Brightness factor.
    pub brightness: f64,
    /// Radius of the softening blur.
    pub soften_radius: f64,
    /// Contrast factor.
    pub contrast: f64,
    /// Grain intensity in `[0, 1]`.
    pub grain: f64,
    /// Sharpness factor.
    pub sharpness: f64,
    /// Saturation factor applied after sharpening.
    pub saturation_reduction: f64,
    /// Light-leak preset.
    pub light_leak_preset: LightLeakPreset,
    /// Custom light-leak parameters.
    pub light_leak_config: Option<LightLeakConfig>,
    /// Tint preset.
    pub tint: TintPreset,
    /// Custom tint coefficients.
    pub tint_config: Option<TintConfig>,
    /// Vignette preset.
    pub vignette_preset: VignettePreset,
    /// Custom vignette parameters.
    pub vignette_config: Option<VignetteConfig>,
}

impl Default for FilmSettings {
    fn default() -> Self {
        Self {
            output_size: Dims {
                width: 1200,
                height: 1200,
            },
            centering: (0.55, 0.7),
            saturation_boost: 1.24,
            brightness: 1.1,
            soften_radius: 1.0,
            contrast: 1.6,
            grain: 0.02,
            sharpness: 1.15,
            saturation_reduction: 0.8,
            light_leak_preset: LightLeakPreset::Nice,
            light_leak_config: None,
            tint: TintPreset::Brown,
            tint_config: None,
            vignette_preset: VignettePreset::PaleRect,
            vignette_config: None,
        }
    }
}

impl FilmSettings {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FilmResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FilmError::config(format!("parse settings JSON: {e}")))
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FilmResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FilmError::config(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Effective light-leak parameters.
    pub fn light_leak(&self) -> LightLeakConfig {
        self.light_leak_config
            .unwrap_or_else(|| self.light_leak_preset.config())
    }

    /// Effective tint coefficients.
    pub fn tint(&self) -> TintConfig {
        self.tint_config.unwrap_or_else(|| self.tint.config())
    }

    /// Effective vignette parameters.
    pub fn vignette(&self) -> VignetteConfig {
        self.vignette_config
            .unwrap_or_else(|| self.vignette_preset.config())
    }

    /// Check all values, including the effective artifact parameters.
    pub fn validate(&self) -> FilmResult<()> {
        let size = Dims::new(self.output_size.width, self.output_size.height)
            .map_err(|e| FilmError::config(format!("output_size: {e}")))?;
        let (cx, cy) = self.centering;
        if !(0.0..=1.0).contains(&cx) || !(0.0..=1.0).contains(&cy) {
            return Err(FilmError::config(format!(
                "centering must be within [0, 1], got ({cx}, {cy})"
            )));
        }
        for (name, v) in [
            ("saturation_boost", self.saturation_boost),
            ("brightness", self.brightness),
            ("soften_radius", self.soften_radius),
            ("contrast", self.contrast),
            ("sharpness", self.sharpness),
            ("saturation_reduction", self.saturation_reduction),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(FilmError::config(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.grain) {
            return Err(FilmError::config(format!(
                "grain must be within [0, 1], got {}",
                self.grain
            )));
        }

        self.light_leak()
            .validate_for(size)
            .map_err(|e| FilmError::config(format!("light leak: {e}")))?;
        self.tint()
            .validate()
            .map_err(|e| FilmError::config(format!("tint: {e}")))?;
        self.vignette()
            .validate()
            .map_err(|e| FilmError::config(format!("vignette: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/settings.rs"]
mod tests;
