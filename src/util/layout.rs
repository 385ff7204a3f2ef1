//! AttributeLayout - combines a numeric kind with an item size.

use super::NumericKind;
use std::fmt;

/// Describes how one record of an attribute buffer is stored.
///
/// Pairs a [`NumericKind`] with the number of elements per item.
/// A vertex position is Float32 with item size 3.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeLayout {
    /// Element representation
    pub kind: NumericKind,
    /// Number of elements per item (1 for scalar, 3 for a position, ...)
    pub item_size: usize,
}

impl AttributeLayout {
    /// Create a layout with given kind and item size.
    #[inline]
    pub const fn new(kind: NumericKind, item_size: usize) -> Self {
        Self { kind, item_size }
    }

    /// Create a scalar layout (item size 1).
    #[inline]
    pub const fn scalar(kind: NumericKind) -> Self {
        Self { kind, item_size: 1 }
    }

    /// Returns the size in bytes of one item.
    #[inline]
    pub const fn item_bytes(&self) -> usize {
        self.kind.byte_width() * self.item_size
    }

    /// Returns true if a buffer can be built with this layout.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.item_size > 0
    }

    // === Common attribute layouts ===

    pub const POSITION: Self = Self::new(NumericKind::Float32, 3);
    pub const NORMAL: Self = Self::new(NumericKind::Float32, 3);
    pub const COLOR: Self = Self::new(NumericKind::Float32, 3);
    pub const COLOR_RGBA: Self = Self::new(NumericKind::Float32, 4);
    pub const TANGENT: Self = Self::new(NumericKind::Float32, 4);
    pub const UV: Self = Self::new(NumericKind::Float32, 2);
    pub const SKIN_INDEX: Self = Self::new(NumericKind::Uint16, 4);
    pub const SKIN_WEIGHT: Self = Self::new(NumericKind::Float32, 4);
    pub const LINE_DISTANCE: Self = Self::scalar(NumericKind::Float32);

    // Index buffers
    pub const INDEX16: Self = Self::scalar(NumericKind::Uint16);
    pub const INDEX32: Self = Self::scalar(NumericKind::Uint32);
}

impl fmt::Debug for AttributeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.item_size == 1 {
            write!(f, "{}", self.kind.name())
        } else {
            write!(f, "{}[{}]", self.kind.name(), self.item_size)
        }
    }
}

impl fmt::Display for AttributeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
