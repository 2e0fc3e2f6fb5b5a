//! The user-adjustable parameters and their textual input.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_HEIGHT_SCALE, DEFAULT_NOISE_SCALE};
use crate::error::{ensure_finite, TerrainError};

/// Parameters that shape the height field. Changing either one regenerates
/// the whole field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Base noise frequency per grid cell.
    pub noise_scale: f32,
    /// Upper end of the height range.
    pub height_scale: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            noise_scale: DEFAULT_NOISE_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
        }
    }
}

/// The four live controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    NoiseScale,
    HeightScale,
    RotationSpeed,
    Threshold,
}

/// A parsed control value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Int(i64),
}

impl ParamKind {
    pub const ALL: [ParamKind; 4] = [
        ParamKind::NoiseScale,
        ParamKind::HeightScale,
        ParamKind::RotationSpeed,
        ParamKind::Threshold,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKind::NoiseScale => "noise_scale",
            ParamKind::HeightScale => "height_scale",
            ParamKind::RotationSpeed => "rotation_speed",
            ParamKind::Threshold => "threshold",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, TerrainError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| TerrainError::UnknownParameter(name.to_string()))
    }

    /// Environment variable overriding this parameter at startup.
    pub fn env_var(self) -> &'static str {
        match self {
            ParamKind::NoiseScale => "ONEBIT_NOISE_SCALE",
            ParamKind::HeightScale => "ONEBIT_HEIGHT_SCALE",
            ParamKind::RotationSpeed => "ONEBIT_ROTATION_SPEED",
            ParamKind::Threshold => "ONEBIT_THRESHOLD",
        }
    }

    /// Whether a change to this parameter rebuilds the height field.
    pub fn regenerates(self) -> bool {
        matches!(self, ParamKind::NoiseScale | ParamKind::HeightScale)
    }

    /// Parse text input. Noise scale and rotation speed are floats, height
    /// scale and threshold integers. Non-numeric and non-finite input is
    /// rejected.
    pub fn parse(self, input: &str) -> Result<ParamValue, TerrainError> {
        let trimmed = input.trim();
        let parse_err = || TerrainError::Parse {
            name: self.name(),
            input: input.to_string(),
        };
        match self {
            ParamKind::NoiseScale | ParamKind::RotationSpeed => {
                let value: f32 = trimmed.parse().map_err(|_| parse_err())?;
                Ok(ParamValue::Float(ensure_finite(self.name(), value)?))
            }
            ParamKind::HeightScale | ParamKind::Threshold => {
                trimmed.parse().map(ParamValue::Int).map_err(|_| parse_err())
            }
        }
    }
}

impl ParamValue {
    pub fn as_f32(self) -> f32 {
        match self {
            ParamValue::Float(v) => v,
            ParamValue::Int(v) => v as f32,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            ParamValue::Float(v) => v as i64,
            ParamValue::Int(v) => v,
        }
    }
}
