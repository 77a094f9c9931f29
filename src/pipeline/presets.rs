//! Named artifact configurations.

use crate::effects::light_leak::{LightLeakConfig, Offset};
use crate::effects::tint::TintConfig;
use crate::effects::vignette::{FrameShape, VignetteConfig};
use crate::foundation::error::{FilmError, FilmResult};
use std::str::FromStr;

/// Light-leak presets, numbered 1 to 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightLeakPreset {
    /// Few large, soft figures kept away from the borders.
    Nice,
    /// Large figures with line traces, as left by film rollers.
    RollersTrace,
    /// Many small roller traces.
    RollersTraceDense,
    /// Small crisp figures and lines.
    ClearLines,
    /// Many small crisp figures and lines.
    ClearLinesDense,
}

impl LightLeakPreset {
    /// All presets in index order.
    pub const ALL: [Self; 5] = [
        Self::Nice,
        Self::RollersTrace,
        Self::RollersTraceDense,
        Self::ClearLines,
        Self::ClearLinesDense,
    ];

    /// Look up a preset by its 1-based index.
    pub fn from_index(index: u32) -> FilmResult<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
            .ok_or_else(|| {
                FilmError::invalid_argument(format!("light leak preset must be 1-5, got {index}"))
            })
    }

    /// 1-based index.
    pub fn index(self) -> u32 {
        self as u32 + 1
    }

    /// snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nice => "nice",
            Self::RollersTrace => "rollers_trace",
            Self::RollersTraceDense => "rollers_trace_dense",
            Self::ClearLines => "clear_lines",
            Self::ClearLinesDense => "clear_lines_dense",
        }
    }

    /// Generator parameters of this preset.
    pub fn config(self) -> LightLeakConfig {
        let (max_radius, figure_count, density, offset, max_transparency, use_lines) = match self
        {
            Self::Nice => (1000, 200, 50.0, Offset { x: 100, y: 50 }, 250, false),
            Self::RollersTrace => (700, 50, 20.0, Offset::default(), 200, true),
            Self::RollersTraceDense => (150, 500, 10.0, Offset::default(), 200, true),
            Self::ClearLines => (150, 50, 60.0, Offset::default(), 200, true),
            Self::ClearLinesDense => (100, 250, 40.0, Offset::default(), 200, true),
        };
        LightLeakConfig {
            max_radius,
            figure_count,
            density,
            offset,
            max_transparency,
            use_lines,
        }
    }
}

impl FromStr for LightLeakPreset {
    type Err = FilmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u32>() {
            return Self::from_index(index);
        }
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilmError::invalid_argument(format!("unknown light leak preset '{s}'")))
    }
}

/// Vignette presets, numbered 0 to 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VignettePreset {
    /// Narrow dark rectangular frame.
    SmallRect,
    /// Very narrow rectangular frame.
    PaleRect,
    /// Soft oval frame over a half-dark background.
    Round,
}

impl VignettePreset {
    /// All presets in index order.
    pub const ALL: [Self; 3] = [Self::SmallRect, Self::PaleRect, Self::Round];

    /// Look up a preset by its 0-based index.
    pub fn from_index(index: u32) -> FilmResult<Self> {
        Self::ALL.get(index as usize).copied().ok_or_else(|| {
            FilmError::invalid_argument(format!("vignette preset must be 0-2, got {index}"))
        })
    }

    /// 0-based index.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::SmallRect => "small_rect",
            Self::PaleRect => "pale_rect",
            Self::Round => "round",
        }
    }

    /// Mask parameters of this preset.
    pub fn config(self) -> VignetteConfig {
        let (size_fraction, transparency, brightness, density, frame) = match self {
            Self::SmallRect => (0.02, 0, 220, 60.0, FrameShape::Rect),
            Self::PaleRect => (0.01, 0, 220, 60.0, FrameShape::Rect),
            Self::Round => (0.05, 120, 250, 5.0, FrameShape::Round),
        };
        VignetteConfig {
            size_fraction,
            transparency,
            brightness,
            density,
            frame,
            corner_radius: 0.0,
        }
    }
}

impl FromStr for VignettePreset {
    type Err = FilmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u32>() {
            return Self::from_index(index);
        }
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilmError::invalid_argument(format!("unknown vignette preset '{s}'")))
    }
}

/// Named color casts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TintPreset {
    /// [`TintConfig::BROWN`].
    Brown,
    /// [`TintConfig::RED`].
    Red,
    /// [`TintConfig::BLUE`].
    Blue,
}

impl TintPreset {
    /// All presets.
    pub const ALL: [Self; 3] = [Self::Brown, Self::Red, Self::Blue];

    /// snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Brown => "brown",
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }

    /// Channel coefficients of this preset.
    pub fn config(self) -> TintConfig {
        match self {
            Self::Brown => TintConfig::BROWN,
            Self::Red => TintConfig::RED,
            Self::Blue => TintConfig::BLUE,
        }
    }
}

impl FromStr for TintPreset {
    type Err = FilmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FilmError::invalid_argument(format!("unknown tint '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/presets.rs"]
mod tests;
