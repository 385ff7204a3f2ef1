//! Utility types shared by buffers and interpolants.
//!
//! This module contains fundamental types used throughout the library:
//! - [`NumericKind`] / [`AttributeScalar`] - Element representations
//! - [`AttributeLayout`] - Kind + item size
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam

mod kind;
mod layout;
mod error;
mod math;

pub use kind::*;
pub use layout::*;
pub use error::*;
pub use math::*;
