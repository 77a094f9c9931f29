//! Pixel storage and the drawing/blur capabilities the artifact generators build on.

/// Separable Gaussian blur.
pub mod blur;
/// 8-bit pixel buffers.
pub mod buffer;
/// Shape rasterization into pixel buffers.
pub mod shapes;
