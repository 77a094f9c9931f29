//! End-to-end film look: enhancement plus artifact stages driven by settings and presets.

/// Stage orchestration.
pub mod film;
/// Named artifact configurations.
pub mod presets;
/// JSON-loadable run settings.
pub mod settings;
