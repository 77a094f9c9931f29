//! Procedural film artifacts and the compositing math that lays them onto a photograph.

/// Opacity compositing and linear blending.
pub mod composite;
/// Gaussian film grain.
pub mod grain;
/// Randomized warm light-leak figures.
pub mod light_leak;
/// Per-channel color shift.
pub mod tint;
/// Edge-darkening masks.
pub mod vignette;
