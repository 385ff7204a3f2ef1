//! Interpolant settings.

use serde::{Deserialize, Serialize};

/// How a cubic interpolant invents the missing neighbour at either end of the track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// Mirror the interval so the second derivative vanishes at the end.
    #[default]
    ZeroCurvature,
    /// Extrapolate a flat tangent at the end.
    ZeroSlope,
    /// Treat the track as looping: the first and last samples are neighbours.
    WrapAround,
}

/// Strategy-specific knobs shared by every interpolant.
///
/// A set of interpolants can share one settings value so that a whole clip
/// is switched at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpolantSettings {
    /// Ending used before the first sample
    pub ending_start: Ending,
    /// Ending used after the last sample
    pub ending_end: Ending,
}

impl InterpolantSettings {
    /// Same ending at both sides.
    pub const fn uniform(ending: Ending) -> Self {
        Self {
            ending_start: ending,
            ending_end: ending,
        }
    }
}
