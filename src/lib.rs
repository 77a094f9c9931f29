//! filmfx gives digital photographs an analog film look.
//!
//! The crate generates randomized film artifacts and composites them onto an image:
//!
//! - [`effects::vignette`]: blurred frame masks that darken the edges
//! - [`effects::light_leak`]: warm translucent figures simulating exposure defects
//! - [`effects::grain`]: per-pixel Gaussian noise
//! - [`effects::tint`]: additive per-channel color shift
//!
//! [`FilmPipeline`] chains them with the usual enhancement steps using named presets. All
//! randomness flows through an explicit [`RandomSource`], so a run is reproducible from its
//! seed.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Artifact generators and compositing.
pub mod effects;
/// Crop, resample and tone adjustments.
pub mod enhance;
/// Preset-driven end-to-end processing.
pub mod pipeline;
/// Pixel buffers, shape drawing and blur.
pub mod raster;

pub use crate::foundation::core::{BBox, Dims, Point, Rect, Rgba8};
pub use crate::foundation::error::{FilmError, FilmResult};
pub use crate::foundation::rng::{RandomSource, RandomStream};

pub use crate::effects::light_leak::{LightLeakConfig, Offset};
pub use crate::effects::tint::TintConfig;
pub use crate::effects::vignette::{FrameShape, VignetteConfig};
pub use crate::enhance::{Enhancer, ImageEnhancer};
pub use crate::pipeline::film::FilmPipeline;
pub use crate::pipeline::presets::{LightLeakPreset, TintPreset, VignettePreset};
pub use crate::pipeline::settings::FilmSettings;
pub use crate::raster::blur::{BlurOperator, GaussianBlur};
pub use crate::raster::buffer::{ChannelLayout, RasterBuffer};
pub use crate::raster::shapes::{CpuRasterizer, ShapeRasterizer};
