//! Serializable description of a single animated channel.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::util::{Chrono, Result};

use super::{Cubic, Discrete, Interpolant, InterpolantSettings, Interpolator, Linear, QuaternionSlerp};

/// Interpolation strategy selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    #[default]
    Discrete,
    Linear,
    Cubic,
    Quaternion,
}

impl InterpolationMode {
    /// Fresh boxed strategy for this mode.
    pub fn build(self) -> Box<dyn Interpolator> {
        match self {
            Self::Discrete => Box::new(Discrete),
            Self::Linear => Box::new(Linear),
            Self::Cubic => Box::new(Cubic::default()),
            Self::Quaternion => Box::new(QuaternionSlerp),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Discrete => "discrete",
            Self::Linear => "linear",
            Self::Cubic => "cubic",
            Self::Quaternion => "quaternion",
        }
    }
}

/// One channel's raw samples plus how to interpolate them.
///
/// ```json
/// { "times": [0, 1, 2], "values": [10, 20, 30], "value_size": 1, "mode": "linear" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub times: Vec<Chrono>,
    pub values: Vec<f64>,
    #[serde(default = "default_value_size")]
    pub value_size: usize,
    #[serde(default)]
    pub mode: InterpolationMode,
    #[serde(default)]
    pub settings: InterpolantSettings,
}

fn default_value_size() -> usize {
    1
}

impl Track {
    /// Parse a track from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a track from a JSON file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let track = Self::from_json(&text)?;
        tracing::debug!(samples = track.times.len(), mode = track.mode.name(), "loaded track");
        Ok(track)
    }

    /// Build an interpolant over this track's samples.
    pub fn interpolant(&self) -> Result<Interpolant<Box<dyn Interpolator>>> {
        Ok(Interpolant::with_interpolator(
            self.times.clone(),
            self.values.clone(),
            self.value_size,
            self.mode.build(),
        )?
        .with_settings(self.settings))
    }
}
