//! Typed vertex-attribute storage.
//!
//! - [`AttributeBuffer`] - itemized buffer with kind-checked bulk copies
//! - [`AttributeStorage`] - the single live typed vector behind a buffer

mod buffer;
mod storage;

pub use buffer::{AttributeBuffer, UploadCallback};
pub use storage::AttributeStorage;
