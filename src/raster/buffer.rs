use crate::foundation::core::Dims;
use crate::foundation::error::{FilmError, FilmResult};

/// Channel layout of a [`RasterBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single luminance channel, used for opacity masks.
    Luma,
    /// Opaque color.
    Rgb,
    /// Color with straight (non-premultiplied) alpha.
    Rgba,
}

impl ChannelLayout {
    /// Bytes per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Number of leading channels carrying color (alpha excluded).
    pub const fn color_channels(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::Rgb | Self::Rgba => 3,
        }
    }
}

/// Tightly packed, row-major 8-bit pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    dims: Dims,
    layout: ChannelLayout,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a buffer with every pixel set to `fill` (one value per channel).
    pub fn filled(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        fill: &[u8],
    ) -> FilmResult<Self> {
        let dims = Dims::new(width, height)?;
        if fill.len() != layout.channels() {
            return Err(FilmError::invalid_argument(format!(
                "fill has {} values but {layout:?} has {} channels",
                fill.len(),
                layout.channels()
            )));
        }
        let data = fill.repeat(dims.pixel_count());
        Ok(Self { dims, layout, data })
    }

    /// Wrap raw bytes; `data.len()` must equal `width * height * channels`.
    pub fn from_raw(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        data: Vec<u8>,
    ) -> FilmResult<Self> {
        let dims = Dims::new(width, height)?;
        let expected = dims
            .pixel_count()
            .checked_mul(layout.channels())
            .ok_or_else(|| FilmError::invalid_argument("raster buffer size overflow"))?;
        if data.len() != expected {
            return Err(FilmError::invalid_argument(format!(
                "raster data has {} bytes, expected {expected} for {width}x{height} {layout:?}",
                data.len()
            )));
        }
        Ok(Self { dims, layout, data })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// Dimensions of the buffer.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Channel layout.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Bytes per pixel.
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Raw pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Channel values of the pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = self.offset(x, y);
        &self.data[i..i + self.channels()]
    }

    /// Mutable channel values of the pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let i = self.offset(x, y);
        let c = self.channels();
        &mut self.data[i..i + c]
    }

    /// Fail with [`FilmError::DimensionMismatch`] unless `other` has this buffer's dimensions.
    pub fn ensure_same_dims(&self, other: Dims) -> FilmResult<()> {
        if self.dims != other {
            return Err(FilmError::dimension_mismatch(
                self.dims.as_tuple(),
                other.as_tuple(),
            ));
        }
        Ok(())
    }

    /// Fail with [`FilmError::InvalidArgument`] unless the buffer holds color (RGB or RGBA).
    pub fn ensure_color(&self, what: &str) -> FilmResult<()> {
        match self.layout {
            ChannelLayout::Rgb | ChannelLayout::Rgba => Ok(()),
            ChannelLayout::Luma => Err(FilmError::invalid_argument(format!(
                "{what} expects an RGB or RGBA image, got Luma"
            ))),
        }
    }

    /// Convert a decoded image, keeping an alpha channel only when the source has one.
    pub fn from_dynamic(img: &image::DynamicImage) -> FilmResult<Self> {
        let (w, h) = (img.width(), img.height());
        if img.color().has_alpha() {
            Self::from_raw(w, h, ChannelLayout::Rgba, img.to_rgba8().into_raw())
        } else {
            Self::from_raw(w, h, ChannelLayout::Rgb, img.to_rgb8().into_raw())
        }
    }

    /// Convert into an `image` crate value for encoding or resampling.
    pub fn to_dynamic(&self) -> FilmResult<image::DynamicImage> {
        let (w, h) = (self.width(), self.height());
        let data = self.data.clone();
        let img = match self.layout {
            ChannelLayout::Luma => {
                image::GrayImage::from_raw(w, h, data).map(image::DynamicImage::ImageLuma8)
            }
            ChannelLayout::Rgb => {
                image::RgbImage::from_raw(w, h, data).map(image::DynamicImage::ImageRgb8)
            }
            ChannelLayout::Rgba => {
                image::RgbaImage::from_raw(w, h, data).map(image::DynamicImage::ImageRgba8)
            }
        };
        img.ok_or_else(|| FilmError::invalid_argument("raster data does not fit image container"))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.dims.width && y < self.dims.height,
            "pixel ({x}, {y}) outside {}x{}",
            self.dims.width,
            self.dims.height
        );
        ((y as usize) * (self.dims.width as usize) + (x as usize)) * self.channels()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
