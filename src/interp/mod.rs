//! Keyframe interpolation.
//!
//! This module provides:
//! - [`Interpolant`] - cached interval search over sampled tracks
//! - [`Interpolator`] - strategy trait, with [`Discrete`], [`Linear`],
//!   [`Cubic`] and [`QuaternionSlerp`] implementations
//! - [`InterpolantSettings`] - ending modes consulted by strategies
//! - [`Track`] - serializable channel description

mod cubic;
mod interpolant;
mod quaternion;
mod settings;
mod strategy;
mod track;

pub use cubic::Cubic;
pub use interpolant::Interpolant;
pub use quaternion::QuaternionSlerp;
pub use settings::{Ending, InterpolantSettings};
pub use strategy::{Discrete, Interpolator, Linear, Samples};
pub use track::{InterpolationMode, Track};
