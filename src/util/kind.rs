//! Numeric kinds - the nine element representations an attribute buffer can hold.

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Element representation of an attribute buffer.
///
/// Each kind has a fixed byte width and is either an integer or a
/// floating point type. A buffer's kind is chosen at construction and
/// never changes afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NumericKind {
    /// Signed 8-bit integer
    Int8 = 0,
    /// Unsigned 8-bit integer (wrapping conversion)
    Uint8 = 1,
    /// Unsigned 8-bit integer (clamping, round-half-even conversion)
    Uint8Clamped = 2,
    /// Signed 16-bit integer
    Int16 = 3,
    /// Unsigned 16-bit integer
    Uint16 = 4,
    /// Signed 32-bit integer
    Int32 = 5,
    /// Unsigned 32-bit integer
    Uint32 = 6,
    /// 32-bit floating point (IEEE 754 single precision)
    #[default]
    Float32 = 7,
    /// 64-bit floating point (IEEE 754 double precision)
    Float64 = 8,
}

impl NumericKind {
    /// Number of numeric kinds.
    pub const COUNT: usize = 9;

    /// All kinds, in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Int8,
        Self::Uint8,
        Self::Uint8Clamped,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
    ];

    /// Returns the size in bytes of a single element of this kind.
    #[inline]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 | Self::Uint8Clamped => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Returns true if elements of this kind are floating point.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true if this is an integer kind (including the clamped byte).
    #[inline]
    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Returns true if this is a signed kind.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Float32 | Self::Float64
        )
    }

    /// Returns the name of this kind as a string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Uint8Clamped => "uint8_clamped",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    /// Parse a kind from its name string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Convert from u8 value.
    pub const fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Int8),
            1 => Some(Self::Uint8),
            2 => Some(Self::Uint8Clamped),
            3 => Some(Self::Int16),
            4 => Some(Self::Uint16),
            5 => Some(Self::Int32),
            6 => Some(Self::Uint32),
            7 => Some(Self::Float32),
            8 => Some(Self::Float64),
            _ => None,
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// === Scalar trait for kind-checked access ===

/// Trait for element types that back a [`NumericKind`].
///
/// Ties a Rust primitive to its kind and defines how a widened `f64`
/// narrows back into it. Integer kinds wrap modulo their width, the
/// clamped byte saturates, floats round to nearest.
pub trait AttributeScalar: Pod + Zeroable + Copy + Default + PartialEq + fmt::Debug + Send + Sync {
    /// The corresponding NumericKind.
    const KIND: NumericKind;

    /// Narrow a widened value into this representation.
    fn from_f64(v: f64) -> Self;

    /// Widen this value to `f64` (lossless for every kind).
    fn to_f64(self) -> f64;
}

/// Truncate toward zero and wrap modulo `2^bits`, mapping NaN and infinities to 0.
#[inline]
fn wrap_to_bits(v: f64, bits: u32) -> u64 {
    if !v.is_finite() {
        return 0;
    }
    let modulus = (1u64 << bits) as f64;
    v.trunc().rem_euclid(modulus) as u64
}

macro_rules! impl_wrapping_scalar {
    ($ty:ty, $kind:ident, $bits:expr) => {
        impl AttributeScalar for $ty {
            const KIND: NumericKind = NumericKind::$kind;

            #[inline]
            fn from_f64(v: f64) -> Self {
                wrap_to_bits(v, $bits) as $ty
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_wrapping_scalar!(i8, Int8, 8);
impl_wrapping_scalar!(u8, Uint8, 8);
impl_wrapping_scalar!(i16, Int16, 16);
impl_wrapping_scalar!(u16, Uint16, 16);
impl_wrapping_scalar!(i32, Int32, 32);
impl_wrapping_scalar!(u32, Uint32, 32);

impl AttributeScalar for f32 {
    const KIND: NumericKind = NumericKind::Float32;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl AttributeScalar for f64 {
    const KIND: NumericKind = NumericKind::Float64;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Clamped byte with guaranteed 1-byte storage.
///
/// Same layout as `u8`, but conversions saturate to `0..=255` and round
/// half to even instead of wrapping. NaN converts to 0.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct Clamped8(pub u8);

impl Clamped8 {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(u8::MAX);

    #[inline]
    pub const fn new(v: u8) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Saturating conversion from any float.
    #[inline]
    pub fn clamp_from(v: f64) -> Self {
        if v.is_nan() {
            return Self(0);
        }
        Self(v.clamp(0.0, 255.0).round_ties_even() as u8)
    }
}

impl From<u8> for Clamped8 {
    #[inline]
    fn from(v: u8) -> Self {
        Self(v)
    }
}

impl From<Clamped8> for u8 {
    #[inline]
    fn from(v: Clamped8) -> Self {
        v.0
    }
}

impl fmt::Debug for Clamped8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Clamped8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AttributeScalar for Clamped8 {
    const KIND: NumericKind = NumericKind::Uint8Clamped;

    #[inline]
    fn from_f64(v: f64) -> Self {
        Self::clamp_from(v)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.0 as f64
    }
}
