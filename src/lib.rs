//! # scene-numeric
//!
//! Numeric core of a real-time 3D scene graph: typed vertex-attribute
//! buffers headed for the GPU, and cached keyframe interpolation for
//! evaluating animation tracks at arbitrary times.
//!
//! Geometry containers, scene nodes and renderer bindings live elsewhere;
//! they hand plain numeric arrays to this crate and get typed buffers or
//! interpolated values back.
//!
//! ## Modules
//!
//! - [`util`] - Numeric kinds, layouts, math re-exports, errors
//! - [`attribute`] - Typed attribute buffers
//! - [`interp`] - Interpolants and interpolation strategies
//!
//! ## Example
//!
//! ```
//! use scene_numeric::prelude::*;
//!
//! let mut positions = AttributeBuffer::with_layout(AttributeLayout::POSITION, 2)?;
//! positions.copy_vector3s_array(&[Vec3::ZERO, Vec3::X])?;
//! assert_eq!(positions.get_x(1), Some(1.0));
//!
//! let mut track = Interpolant::new(vec![0.0, 1.0, 2.0], vec![10.0, 20.0, 30.0], 1)?;
//! assert_eq!(track.evaluate(1.5)?, &[20.0]);
//! # Ok::<(), scene_numeric::Error>(())
//! ```

pub mod util;
pub mod attribute;
pub mod interp;

// Re-export commonly used types
pub use util::{AttributeLayout, NumericKind, Error, Result};
pub use attribute::AttributeBuffer;
pub use interp::Interpolant;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{
        AttributeLayout, AttributeScalar, Chrono, Clamped8, Color, Error, NumericKind, Result,
        Vec2, Vec3, Vec4,
    };
    pub use crate::attribute::{AttributeBuffer, AttributeStorage};
    pub use crate::interp::{
        Cubic, Discrete, Ending, Interpolant, InterpolantSettings, InterpolationMode, Interpolator,
        Linear, QuaternionSlerp, Track,
    };
}
