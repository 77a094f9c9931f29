//! Light leaks / film burn.
//!
//! A light-leak layer is a transparent RGBA canvas covered with many randomly placed warm
//! figures (arcs, ellipses, chords and optional full-height lines), blurred so they read as
//! diffuse exposure defects. The layer is flattened onto black and mixed into the photograph
//! with a small fixed weight.

use crate::effects::composite::{blend, flatten_onto_black};
use crate::foundation::core::{BBox, Dims, Point, Rgba8};
use crate::foundation::error::{FilmError, FilmResult};
use crate::foundation::rng::RandomSource;
use crate::raster::blur::{BlurOperator, GaussianBlur};
use crate::raster::buffer::{ChannelLayout, RasterBuffer};
use crate::raster::shapes::{CpuRasterizer, ShapeRasterizer};

/// Weight of the flattened artifact layer when mixed into the photograph.
pub const LEAK_BLEND_WEIGHT: f64 = 0.1;

/// Smallest alpha a figure is drawn with; `max_transparency` must not be below it.
pub const MIN_FIGURE_ALPHA: u8 = 100;

const FIGURE_STROKE_WIDTH: f64 = 5.0;
const LINE_MAX_ALPHA: f64 = 200.0;

/// Border excluded from figure centers, in pixels from each edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    /// Left/right border.
    pub x: u32,
    /// Top/bottom border.
    pub y: u32,
}

/// Parameters of a light-leak layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightLeakConfig {
    /// Upper bound on a figure's extent from its center, in pixels.
    pub max_radius: u32,
    /// Number of figures sampled.
    pub figure_count: u32,
    /// Divisor of the blur radius; higher values keep figures recognisable.
    pub density: f64,
    /// Border excluded from figure centers.
    pub offset: Offset,
    /// Upper bound of the per-figure alpha.
    pub max_transparency: u8,
    /// Allow full-height vertical line figures.
    pub use_lines: bool,
}

impl Default for LightLeakConfig {
    fn default() -> Self {
        Self {
            max_radius: 500,
            figure_count: 250,
            density: 100.0,
            offset: Offset::default(),
            max_transparency: 200,
            use_lines: false,
        }
    }
}

impl LightLeakConfig {
    /// Check value ranges that do not depend on the image size.
    pub fn validate(&self) -> FilmResult<()> {
        if self.max_radius == 0 {
            return Err(FilmError::invalid_argument("light leak max_radius must be > 0"));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(FilmError::invalid_argument(format!(
                "light leak density must be > 0, got {}",
                self.density
            )));
        }
        if self.max_transparency < MIN_FIGURE_ALPHA {
            return Err(FilmError::invalid_argument(format!(
                "light leak max_transparency must be >= {MIN_FIGURE_ALPHA}, got {}",
                self.max_transparency
            )));
        }
        Ok(())
    }

    /// Check that the center area left by `offset` is not empty for `dims`.
    pub fn validate_for(&self, dims: Dims) -> FilmResult<()> {
        self.validate()?;
        if u64::from(self.offset.x) * 2 > u64::from(dims.width)
            || u64::from(self.offset.y) * 2 > u64::from(dims.height)
        {
            return Err(FilmError::invalid_argument(format!(
                "light leak offset ({}, {}) leaves no room in a {}x{} image",
                self.offset.x, self.offset.y, dims.width, dims.height
            )));
        }
        Ok(())
    }
}

/// One drawable light-leak figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometricFigure {
    /// Stroked elliptic arc.
    Arc {
        /// Bounding box of the full ellipse.
        bbox: BBox,
        /// Stroke color.
        color: Rgba8,
        /// Start angle in degrees.
        start_deg: f64,
        /// End angle in degrees.
        end_deg: f64,
        /// Stroke width in pixels.
        stroke_width: f64,
    },
    /// Filled ellipse.
    Ellipse {
        /// Bounding box of the ellipse.
        bbox: BBox,
        /// Fill color.
        color: Rgba8,
    },
    /// Filled chord with an outline of the same color.
    Chord {
        /// Bounding box of the full ellipse.
        bbox: BBox,
        /// Fill and outline color.
        color: Rgba8,
        /// Start angle in degrees.
        start_deg: f64,
        /// End angle in degrees.
        end_deg: f64,
        /// Outline width in pixels.
        stroke_width: f64,
    },
    /// Vertical line spanning the image height.
    VerticalLine {
        /// `(x, 0, x, height)`.
        bbox: BBox,
        /// Line color.
        color: Rgba8,
        /// Line width in pixels.
        stroke_width: f64,
    },
}

impl GeometricFigure {
    /// Bounding box of the figure.
    pub fn bbox(&self) -> BBox {
        match *self {
            Self::Arc { bbox, .. }
            | Self::Ellipse { bbox, .. }
            | Self::Chord { bbox, .. }
            | Self::VerticalLine { bbox, .. } => bbox,
        }
    }

    /// Color of the figure.
    pub fn color(&self) -> Rgba8 {
        match *self {
            Self::Arc { color, .. }
            | Self::Ellipse { color, .. }
            | Self::Chord { color, .. }
            | Self::VerticalLine { color, .. } => color,
        }
    }

    /// Draw the figure into an RGBA buffer.
    pub fn draw(
        &self,
        rasterizer: &mut dyn ShapeRasterizer,
        buf: &mut RasterBuffer,
    ) -> FilmResult<()> {
        let color = self.color().to_array();
        match *self {
            Self::Arc {
                bbox,
                start_deg,
                end_deg,
                stroke_width,
                ..
            } => rasterizer.draw_arc(buf, bbox, start_deg, end_deg, &color, stroke_width),
            Self::Ellipse { bbox, .. } => rasterizer.draw_ellipse(buf, bbox, &color),
            Self::Chord {
                bbox,
                start_deg,
                end_deg,
                stroke_width,
                ..
            } => rasterizer.draw_chord(buf, bbox, start_deg, end_deg, &color, stroke_width),
            Self::VerticalLine {
                bbox, stroke_width, ..
            } => rasterizer.draw_line(
                buf,
                Point::new(bbox.x0 as f64, bbox.y0 as f64),
                Point::new(bbox.x1 as f64, bbox.y1 as f64),
                &color,
                stroke_width,
            ),
        }
    }
}

/// Sample a warm color on the white / orange / red gradient.
pub fn sample_leak_color<R: RandomSource + ?Sized>(rng: &mut R) -> [u8; 3] {
    let r = rng.next_int(200, 255);
    let (gk, bk) = if r == 255 {
        let gk = rng.next_int(69, 255) as f64 / 255.0;
        let bk = if gk > 0.8 {
            gk
        } else {
            rng.next_int(0, 15) as f64 / 1000.0
        };
        (gk, bk)
    } else if r > 230 {
        (
            rng.next_int(0, 110) as f64 / 100.0,
            rng.next_int(0, 20) as f64 / 100.0,
        )
    } else {
        (
            rng.next_int(0, 30) as f64 / 1000.0,
            rng.next_int(0, 30) as f64 / 1000.0,
        )
    };
    let rf = r as f64;
    [
        r as u8,
        (gk * rf).floor().clamp(0.0, 255.0) as u8,
        (bk * rf).floor().clamp(0.0, 255.0) as u8,
    ]
}

/// Sample the next figure.
///
/// Returns `None` for the reserved kind slot, which consumes its draws but paints nothing.
/// `cfg` must already be validated against `dims`.
pub fn sample_figure<R: RandomSource + ?Sized>(
    rng: &mut R,
    dims: Dims,
    cfg: &LightLeakConfig,
) -> Option<GeometricFigure> {
    let (w, h) = (i64::from(dims.width), i64::from(dims.height));
    let x = rng.next_int(i64::from(cfg.offset.x), w - i64::from(cfg.offset.x));
    let y = rng.next_int(i64::from(cfg.offset.y), h - i64::from(cfg.offset.y));

    let [r, g, b] = sample_leak_color(rng);
    let alpha = rng.next_int(i64::from(MIN_FIGURE_ALPHA), i64::from(cfg.max_transparency)) as u8;
    let color = Rgba8::new(r, g, b, alpha);

    let max_radius = i64::from(cfg.max_radius);
    let mut extent = [0i64; 4];
    for e in &mut extent {
        *e = max_radius / rng.next_int(1, 100);
    }
    let [left, top, right, bottom] = extent;
    let top = top * rng.next_int(1, 2);
    let bottom = bottom * rng.next_int(1, 2);
    let bbox = BBox::new(x - left, y - top, x + right, y + bottom);

    let kind = rng.next_int(0, if cfg.use_lines { 9 } else { 8 });
    match kind {
        0..=2 => {
            let (start_deg, end_deg) = sample_angles(rng);
            Some(GeometricFigure::Arc {
                bbox,
                color,
                start_deg,
                end_deg,
                stroke_width: FIGURE_STROKE_WIDTH,
            })
        }
        3..=5 => Some(GeometricFigure::Ellipse { bbox, color }),
        6..=7 => {
            let (start_deg, end_deg) = sample_angles(rng);
            Some(GeometricFigure::Chord {
                bbox,
                color,
                start_deg,
                end_deg,
                stroke_width: FIGURE_STROKE_WIDTH,
            })
        }
        9 => {
            let max_pct = (max_radius * 100 / w + 1).max(1);
            let line_width = (w * rng.next_int(1, max_pct) / 200).max(1);
            // Thinner lines are more opaque.
            let line_alpha = (LINE_MAX_ALPHA * (1.0 - line_width as f64 / w as f64))
                .floor()
                .clamp(0.0, 255.0) as u8;
            Some(GeometricFigure::VerticalLine {
                bbox: BBox::new(x, 0, x, h),
                color: Rgba8 {
                    a: line_alpha,
                    ..color
                },
                stroke_width: line_width as f64,
            })
        }
        _ => None,
    }
}

fn sample_angles<R: RandomSource + ?Sized>(rng: &mut R) -> (f64, f64) {
    let start = rng.next_int(0, 355);
    let end = rng.next_int(0, 360 - start) + start;
    (start as f64, end as f64)
}

/// Generate the blurred RGBA light-leak layer with the default CPU backends.
pub fn generate_light_leak_layer<R: RandomSource + ?Sized>(
    dims: Dims,
    cfg: &LightLeakConfig,
    rng: &mut R,
) -> FilmResult<RasterBuffer> {
    generate_light_leak_layer_with(dims, cfg, rng, &mut CpuRasterizer::new(), &GaussianBlur)
}

/// Generate the blurred RGBA light-leak layer using explicit drawing and blur backends.
#[tracing::instrument(skip(rng, rasterizer, blur))]
pub fn generate_light_leak_layer_with<R: RandomSource + ?Sized>(
    dims: Dims,
    cfg: &LightLeakConfig,
    rng: &mut R,
    rasterizer: &mut dyn ShapeRasterizer,
    blur: &dyn BlurOperator,
) -> FilmResult<RasterBuffer> {
    let dims = Dims::new(dims.width, dims.height)?;
    cfg.validate_for(dims)?;

    let mut mask = RasterBuffer::filled(dims.width, dims.height, ChannelLayout::Rgba, &[0; 4])?;
    let mut drawn = 0u32;
    for _ in 0..cfg.figure_count {
        if let Some(figure) = sample_figure(rng, dims, cfg) {
            figure.draw(rasterizer, &mut mask)?;
            drawn += 1;
        }
    }

    let blur_radius = f64::from(cfg.max_radius) / cfg.density;
    tracing::debug!(drawn, blur_radius, "light leak figures drawn");
    blur.gaussian_blur(&mask, blur_radius)
}

/// Mix a light-leak layer into `image`: `0.9 * image + 0.1 * flatten(layer)`.
pub fn blend_light_leak(image: &RasterBuffer, layer: &RasterBuffer) -> FilmResult<RasterBuffer> {
    let artifact = flatten_onto_black(layer)?;
    blend(image, &artifact, LEAK_BLEND_WEIGHT)
}

/// Generate a light-leak layer sized to `image` and mix it in.
pub fn apply_light_leaks<R: RandomSource + ?Sized>(
    image: &RasterBuffer,
    cfg: &LightLeakConfig,
    rng: &mut R,
) -> FilmResult<RasterBuffer> {
    let layer = generate_light_leak_layer(image.dims(), cfg, rng)?;
    blend_light_leak(image, &layer)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/light_leak.rs"]
mod tests;
