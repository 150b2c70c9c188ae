//! # Configuration
//!
//! World and editing settings, loaded from JSON. Every field has a default, so an
//! empty object (`{}`) is a valid configuration and yields the classic layout: a
//! 10-unit world, 4 subdivisions per edit and the four-color starter floor.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::voxels::world::{world_generation::GenerationMethod, MAX_DIMENSION};

/// Errors produced while loading a [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON or has mistyped fields.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration parsed but describes an unusable world.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for a [`World`](crate::World) and the editing session around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the world cube `[0, world_size)³`.
    pub world_size: f32,
    /// Edit depth a new session starts at.
    pub default_block_dimension: u32,
    /// Coarsest edit depth, i.e. the largest placeable block.
    pub min_block_dimension: u32,
    /// Finest edit depth, i.e. the smallest placeable block.
    pub max_block_dimension: u32,
    /// Ray step at block dimension 0; halves with every extra subdivision.
    pub ray_step_base: f32,
    /// Maximum number of samples taken by one ray cast.
    pub ray_max_steps: u32,
    /// Seconds between repeated edits while place or break is held.
    pub block_interval_secs: f32,
    /// How a fresh world is populated.
    pub generation: GenerationMethod,
    /// Depth of the cells filled by the procedural generation methods.
    pub generation_dimension: u32,
    /// Seed for world generation. A random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            world_size: 10.0,
            default_block_dimension: 4,
            min_block_dimension: 1,
            max_block_dimension: 9,
            ray_step_base: 0.05,
            ray_max_steps: 10000,
            block_interval_secs: 0.25,
            generation: GenerationMethod::Starter,
            generation_dimension: 3,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxel_octree::WorldConfig;
    ///
    /// let config = WorldConfig::from_json_str(r#"{ "world_size": 16.0 }"#).unwrap();
    /// assert_eq!(config.world_size, 16.0);
    /// assert_eq!(config.default_block_dimension, 4);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that the settings describe a usable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.world_size.is_finite() || self.world_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world_size must be a positive number, got {}",
                self.world_size
            )));
        }
        if !self.ray_step_base.is_finite() || self.ray_step_base <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ray_step_base must be a positive number, got {}",
                self.ray_step_base
            )));
        }
        if self.ray_max_steps == 0 {
            return Err(ConfigError::Invalid("ray_max_steps must be at least 1".into()));
        }
        if !(self.min_block_dimension <= self.default_block_dimension
            && self.default_block_dimension <= self.max_block_dimension)
        {
            return Err(ConfigError::Invalid(format!(
                "block dimensions must satisfy min <= default <= max, got {} <= {} <= {}",
                self.min_block_dimension, self.default_block_dimension, self.max_block_dimension
            )));
        }
        if self.max_block_dimension > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "max_block_dimension must be at most {}, got {}",
                MAX_DIMENSION, self.max_block_dimension
            )));
        }
        if !self.block_interval_secs.is_finite() || self.block_interval_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "block_interval_secs must be a finite, non-negative number, got {}",
                self.block_interval_secs
            )));
        }
        Ok(())
    }
}
