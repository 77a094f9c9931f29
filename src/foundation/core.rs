use crate::foundation::error::{FilmError, FilmResult};

pub use kurbo::{Point, Rect};

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Dims {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dims {
    /// Create validated dimensions; both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> FilmResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilmError::invalid_argument(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by these dimensions.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// `(width, height)` tuple, as used in error payloads.
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Full image area as a continuous rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Integer bounding box `(x0, y0, x1, y1)` in pixel coordinates.
///
/// Both corners are inclusive pixel positions, so a box with `x0 == x1` is one pixel wide.
/// Boxes may extend past the image; drawing clips them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BBox {
    /// Left edge.
    pub x0: i64,
    /// Top edge.
    pub y0: i64,
    /// Right edge (inclusive).
    pub x1: i64,
    /// Bottom edge (inclusive).
    pub y1: i64,
}

impl BBox {
    /// Construct a box, swapping corners so that `x0 <= x1` and `y0 <= y1`.
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Box centered on `(cx, cy)` extending `half` pixels in every direction.
    pub fn centered(cx: i64, cy: i64, half: i64) -> Self {
        Self::new(cx - half, cy - half, cx + half, cy + half)
    }

    /// Continuous rectangle covering every pixel of the box.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.x0 as f64,
            self.y0 as f64,
            (self.x1 + 1) as f64,
            (self.y1 + 1) as f64,
        )
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channel values in `[r, g, b, a]` order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
