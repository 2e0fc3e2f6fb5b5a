//! Startup settings: defaults, an optional JSON file, then env overrides.
//!
//! ```text
//! ONEBIT_TERRAIN_CONFIG=terrain.json   path to a settings file
//! ONEBIT_NOISE_SCALE=0.08              per-parameter overrides, parsed like
//! ONEBIT_HEIGHT_SCALE=40               interactive input
//! ONEBIT_ROTATION_SPEED=0.01
//! ONEBIT_THRESHOLD=100
//! ONEBIT_SEED=1234                     fixed noise seed
//! ```
//!
//! A bad file or a bad override is logged and skipped; startup never fails.

use std::path::Path;

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_CAMERA_DISTANCE, DEFAULT_HEIGHT_SCALE, DEFAULT_NOISE_SCALE, DEFAULT_ROTATION_SPEED,
    DEFAULT_THRESHOLD, TERRAIN_SIZE,
};
use crate::error::TerrainError;
use crate::params::ParamKind;

pub const CONFIG_ENV: &str = "ONEBIT_TERRAIN_CONFIG";
pub const SEED_ENV: &str = "ONEBIT_SEED";

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub terrain_size: usize,
    pub noise_scale: f32,
    pub height_scale: f32,
    pub rotation_speed: f32,
    pub threshold: u8,
    pub camera_distance: f32,
    /// Noise seed; a random one is drawn per session when unset.
    pub seed: Option<i32>,
    /// Outline triangles in black.
    pub stroke: bool,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            terrain_size: TERRAIN_SIZE,
            noise_scale: DEFAULT_NOISE_SCALE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            threshold: DEFAULT_THRESHOLD,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            seed: None,
            stroke: true,
        }
    }
}

impl TerrainSettings {
    pub fn from_json(text: &str) -> Result<Self, TerrainError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Apply overrides from `lookup` (an env var reader). Returns the
    /// overrides that were rejected; the rest are applied.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<TerrainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        for kind in ParamKind::ALL {
            let Some(raw) = lookup(kind.env_var()) else {
                continue;
            };
            if let Err(e) = self.apply_override(kind, &raw) {
                rejected.push(e);
            }
        }
        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse::<i32>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => rejected.push(TerrainError::Parse {
                    name: "seed",
                    input: raw,
                }),
            }
        }
        rejected
    }

    fn apply_override(&mut self, kind: ParamKind, raw: &str) -> Result<(), TerrainError> {
        let value = kind.parse(raw)?;
        match kind {
            ParamKind::NoiseScale => self.noise_scale = value.as_f32(),
            ParamKind::HeightScale => self.height_scale = value.as_f32(),
            ParamKind::RotationSpeed => self.rotation_speed = value.as_f32(),
            ParamKind::Threshold => {
                let v = value.as_i64();
                self.threshold =
                    u8::try_from(v).map_err(|_| TerrainError::ThresholdOutOfRange(v))?;
            }
        }
        Ok(())
    }

    /// Settings for this process: the file named by `ONEBIT_TERRAIN_CONFIG`
    /// if any, then per-parameter env overrides.
    pub fn from_env() -> Self {
        let mut settings = match std::env::var(CONFIG_ENV) {
            Ok(path) => match Self::load(&path) {
                Ok(s) => {
                    info!("Loaded terrain settings from {path}");
                    s
                }
                Err(e) => {
                    warn!("Ignoring terrain settings file {path}: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        for e in settings.apply_overrides(|key| std::env::var(key).ok()) {
            warn!("Ignoring terrain override: {e}");
        }
        settings
    }
}
