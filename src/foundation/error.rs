/// Convenience result type used across filmfx.
pub type FilmResult<T> = Result<T, FilmError>;

/// Top-level error taxonomy used by the artifact generators and the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum FilmError {
    /// A configuration value, preset selector or buffer shape is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two buffers taking part in one operation have different dimensions.
    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        expected.0,
        expected.1,
        actual.0,
        actual.1
    )]
    DimensionMismatch {
        /// `(width, height)` of the reference buffer.
        expected: (u32, u32),
        /// `(width, height)` of the offending buffer.
        actual: (u32, u32),
    },

    /// Errors while reading or parsing pipeline settings.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FilmError {
    /// Build a [`FilmError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`FilmError::DimensionMismatch`] value.
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Build a [`FilmError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<image::ImageError> for FilmError {
    fn from(err: image::ImageError) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
