// ---------------------------------------------------------------------------
// TerrainError: rejected parameters and settings failures
// ---------------------------------------------------------------------------

use std::fmt;

use crate::config::MAX_TERRAIN_SIZE;

/// Errors raised when a parameter update or the settings layer is rejected.
///
/// A rejected update leaves the scene untouched; the shell logs the error and
/// keeps rendering the previous state.
#[derive(Debug)]
pub enum TerrainError {
    /// A numeric parameter was NaN or infinite.
    InvalidParameter { name: &'static str, value: f64 },
    /// Threshold outside the 8-bit luminance range.
    ThresholdOutOfRange(i64),
    /// Text input that does not parse as the parameter's numeric type.
    Parse { name: &'static str, input: String },
    /// Grid size outside `1..=MAX_TERRAIN_SIZE`.
    TerrainSizeOutOfRange(usize),
    /// No parameter is known under this name.
    UnknownParameter(String),
    /// Settings file could not be read.
    ConfigIo(std::io::Error),
    /// Settings file is not valid settings JSON.
    ConfigParse(String),
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainError::InvalidParameter { name, value } => {
                write!(f, "Invalid value for {name}: {value}")
            }
            TerrainError::ThresholdOutOfRange(v) => {
                write!(f, "Threshold {v} is outside 0..=255")
            }
            TerrainError::Parse { name, input } => {
                write!(f, "Cannot parse {input:?} as a value for {name}")
            }
            TerrainError::TerrainSizeOutOfRange(size) => {
                write!(f, "Terrain size {size} is outside 1..={MAX_TERRAIN_SIZE}")
            }
            TerrainError::UnknownParameter(name) => write!(f, "Unknown parameter: {name}"),
            TerrainError::ConfigIo(e) => write!(f, "Settings I/O error: {e}"),
            TerrainError::ConfigParse(msg) => write!(f, "Settings parse error: {msg}"),
        }
    }
}

impl std::error::Error for TerrainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainError::ConfigIo(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainError {
    fn from(e: std::io::Error) -> Self {
        TerrainError::ConfigIo(e)
    }
}

impl From<serde_json::Error> for TerrainError {
    fn from(e: serde_json::Error) -> Self {
        TerrainError::ConfigParse(e.to_string())
    }
}

/// Reject grid sizes that are empty or too large to allocate.
pub(crate) fn ensure_terrain_size(size: usize) -> Result<usize, TerrainError> {
    if (1..=MAX_TERRAIN_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(TerrainError::TerrainSizeOutOfRange(size))
    }
}

/// Reject NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<f32, TerrainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TerrainError::InvalidParameter {
            name,
            value: f64::from(value),
        })
    }
}
