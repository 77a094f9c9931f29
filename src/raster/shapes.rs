use crate::foundation::core::{BBox, Point, Rect};
use crate::foundation::error::{FilmError, FilmResult};
use crate::foundation::math::lerp_u8;
use crate::raster::buffer::RasterBuffer;
use kurbo::{BezPath, Cap, Shape, Stroke, StrokeOpts};

const TOLERANCE: f64 = 0.1;
/// Largest side of one coverage render; bigger regions are drawn tile by tile.
const MAX_TILE: u16 = 4096;

/// Geometric drawing capability.
///
/// Colors are given per buffer channel: one value for a Luma mask, four for an RGBA layer.
/// Drawing overwrites: fully covered pixels take `color` exactly, anti-aliased edge pixels are
/// interpolated toward it, and pixels outside the shape are left untouched. Angles are in
/// degrees, measured clockwise from three o'clock.
pub trait ShapeRasterizer {
    /// Fill the rectangle covering `bbox`, with rounded corners of `corner_radius` pixels.
    fn draw_rounded_rect(
        &mut self,
        buf: &mut RasterBuffer,
        bbox: BBox,
        corner_radius: f64,
        fill: &[u8],
    ) -> FilmResult<()>;

    /// Fill the ellipse inscribed in `bbox`.
    fn draw_ellipse(&mut self, buf: &mut RasterBuffer, bbox: BBox, fill: &[u8]) -> FilmResult<()>;

    /// Stroke the part of the inscribed ellipse between `start_deg` and `end_deg`.
    /// The stroke lies inside `bbox`.
    fn draw_arc(
        &mut self,
        buf: &mut RasterBuffer,
        bbox: BBox,
        start_deg: f64,
        end_deg: f64,
        color: &[u8],
        stroke_width: f64,
    ) -> FilmResult<()>;

    /// Fill the region between the arc `start_deg..end_deg` and the straight line joining its
    /// endpoints, then outline it with a stroke of `stroke_width` inside `bbox`.
    fn draw_chord(
        &mut self,
        buf: &mut RasterBuffer,
        bbox: BBox,
        start_deg: f64,
        end_deg: f64,
        color: &[u8],
        stroke_width: f64,
    ) -> FilmResult<()>;

    /// Stroke a straight segment between two pixel positions (both endpoints included).
    fn draw_line(
        &mut self,
        buf: &mut RasterBuffer,
        from: Point,
        to: Point,
        color: &[u8],
        stroke_width: f64,
    ) -> FilmResult<()>;
}

/// [`ShapeRasterizer`] that computes anti-aliased coverage with `vello_cpu`.
///
/// Each shape is rendered into a scratch pixmap sized to its clipped bounds, so drawing many
/// small figures onto a large buffer stays cheap. Bounds wider or taller than a tile are
/// covered by several renders. The render context is reused across calls of the same size.
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    tile: u16,
}

impl Default for CpuRasterizer {
    fn default() -> Self {
        Self {
            ctx: None,
            tile: MAX_TILE,
        }
    }
}

impl CpuRasterizer {
    /// Create a rasterizer with no cached render context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rasterizer that renders coverage in tiles of at most `tile` pixels per side.
    pub fn with_tile_size(tile: u16) -> Self {
        Self {
            ctx: None,
            tile: tile.max(1),
        }
    }

    fn stamp(&mut self, buf: &mut RasterBuffer, path: &BezPath, color: &[u8]) -> FilmResult<()> {
        if color.len() != buf.channels() {
            return Err(FilmError::invalid_argument(format!(
                "draw color has {} values but the target has {} channels",
                color.len(),
                buf.channels()
            )));
        }
        if path.elements().is_empty() {
            return Ok(());
        }

        let bounds = path
            .bounding_box()
            .inflate(1.0, 1.0)
            .intersect(buf.dims().to_rect());
        let x0 = bounds.x0.floor().max(0.0) as u32;
        let y0 = bounds.y0.floor().max(0.0) as u32;
        let x1 = (bounds.x1.ceil().max(0.0) as u32).min(buf.width());
        let y1 = (bounds.y1.ceil().max(0.0) as u32).min(buf.height());
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }

        let tile = u32::from(self.tile);
        for ty in (y0..y1).step_by(tile as usize) {
            for tx in (x0..x1).step_by(tile as usize) {
                let tw = tile.min(x1 - tx);
                let th = tile.min(y1 - ty);
                self.stamp_tile(buf, path, color, (tx, ty), (tw, th));
            }
        }
        Ok(())
    }

    /// Blend `color` into the `(tw, th)` window at `(tx, ty)`; both sides are at most one tile.
    fn stamp_tile(
        &mut self,
        buf: &mut RasterBuffer,
        path: &BezPath,
        color: &[u8],
        (tx, ty): (u32, u32),
        (tw, th): (u32, u32),
    ) {
        // Tile sides never exceed `self.tile`, itself a u16.
        let (rw, rh) = (tw as u16, th as u16);
        let coverage = self.render_coverage(path, tx, ty, rw, rh);
        let cov_bytes = coverage.data_as_u8_slice();
        for ry in 0..th {
            for rx in 0..tw {
                let cov = cov_bytes[((ry * tw + rx) as usize) * 4 + 3];
                if cov == 0 {
                    continue;
                }
                let px = buf.pixel_mut(tx + rx, ty + ry);
                for (dst, &c) in px.iter_mut().zip(color) {
                    *dst = lerp_u8(*dst, c, cov);
                }
            }
        }
    }

    /// Render `path` in opaque white; the alpha channel of the result is the coverage.
    fn render_coverage(
        &mut self,
        path: &BezPath,
        x0: u32,
        y0: u32,
        width: u16,
        height: u16,
    ) -> vello_cpu::Pixmap {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            -f64::from(x0),
            -f64::from(y0),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);
        pixmap
    }
}

impl ShapeRasterizer for CpuRasterizer {
    fn draw_rounded_rect(
        &mut self,
        buf: &mut RasterBuffer,
        bbox: BBox,
        corner_radius: f64,
        fill: &[u8],
    ) -> FilmResult<()> {
        if !corner_radius.is_finite() || corner_radius < 0.0 {
            return Err(FilmError::invalid_argument(
                "corner radius must be finite and >= 0",
            ));
        }
        let path = kurbo::RoundedRect::from_rect(bbox.to_rect(), corner_radius).to_path(TOLERANCE);
        self.stamp(buf, &path, fill)
    }

    fn draw_ellipse(&mut self, buf: &mut RasterBuffer, bbox: BBox, fill: &[u8]) -> FilmResult<()> {
        let path = kurbo::Ellipse::from_rect(bbox.to_rect()).to_path(TOLERANCE);
        self.stamp(buf, &path, fill)
    }

    fn draw_arc(
        &mut self,
        buf: &mut RasterBuffer,
        bbox: BBox,
        start_deg: f64,
        end_deg: f64,
        color: &[u8],
        stroke_width: f64,
    ) -> FilmResult<()> {
        check_stroke_width(stroke_width)?;
        let Some(arc) = inset_arc(bbox.to_rect(), start_deg, end_deg, stroke_width)? else {
            return Ok(());
        };
        let outline = stroke_outline(&arc.to_path(TOLERANCE), stroke_width, Cap::Butt);
        self.stamp(buf, &outline, color)
    }

    fn draw_chord(
        &mut self,
        buf: &mut RasterBuffer,
        bbox: BBox,
        start_deg: f64,
        end_deg: f64,
        color: &[u8],
        stroke_width: f64,
    ) -> FilmResult<()> {
        check_stroke_width(stroke_width)?;
        let rect = bbox.to_rect();
        if let Some(arc) = inset_arc(rect, start_deg, end_deg, 0.0)? {
            self.stamp(buf, &closed_arc_path(&arc), color)?;
        }
        if let Some(arc) = inset_arc(rect, start_deg, end_deg, stroke_width)? {
            let outline = stroke_outline(&closed_arc_path(&arc), stroke_width, Cap::Butt);
            self.stamp(buf, &outline, color)?;
        }
        Ok(())
    }

    fn draw_line(
        &mut self,
        buf: &mut RasterBuffer,
        from: Point,
        to: Point,
        color: &[u8],
        stroke_width: f64,
    ) -> FilmResult<()> {
        check_stroke_width(stroke_width)?;
        // Pixel positions address pixel centers; square caps make both endpoints inclusive.
        let center = kurbo::Vec2::new(0.5, 0.5);
        let segment = kurbo::Line::new(from + center, to + center).to_path(TOLERANCE);
        let outline = stroke_outline(&segment, stroke_width, Cap::Square);
        self.stamp(buf, &outline, color)
    }
}

fn check_stroke_width(width: f64) -> FilmResult<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(FilmError::invalid_argument(format!(
            "stroke width must be finite and > 0, got {width}"
        )));
    }
    Ok(())
}

/// Arc of the ellipse inscribed in `rect`, shrunk so a stroke of `stroke_width` stays inside.
///
/// Returns `None` for an empty sweep.
fn inset_arc(
    rect: Rect,
    start_deg: f64,
    end_deg: f64,
    stroke_width: f64,
) -> FilmResult<Option<kurbo::Arc>> {
    if !start_deg.is_finite() || !end_deg.is_finite() {
        return Err(FilmError::invalid_argument("arc angles must be finite"));
    }
    let mut sweep = end_deg - start_deg;
    if sweep < 0.0 {
        sweep = sweep.rem_euclid(360.0);
    }
    let sweep = sweep.min(360.0);
    if sweep == 0.0 {
        return Ok(None);
    }

    let rx = ((rect.width() - stroke_width) / 2.0).max(0.0);
    let ry = ((rect.height() - stroke_width) / 2.0).max(0.0);
    Ok(Some(kurbo::Arc::new(
        rect.center(),
        (rx, ry),
        start_deg.to_radians(),
        sweep.to_radians(),
        0.0,
    )))
}

fn closed_arc_path(arc: &kurbo::Arc) -> BezPath {
    let (sin, cos) = arc.start_angle.sin_cos();
    let start = Point::new(
        arc.center.x + arc.radii.x * cos,
        arc.center.y + arc.radii.y * sin,
    );
    let mut path = BezPath::new();
    path.move_to(start);
    path.extend(arc.append_iter(TOLERANCE));
    path.close_path();
    path
}

fn stroke_outline(path: &BezPath, width: f64, cap: Cap) -> BezPath {
    let style = Stroke::new(width).with_caps(cap);
    kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), TOLERANCE)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/raster/shapes.rs"]
mod tests;
