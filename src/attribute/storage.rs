//! Tagged storage for attribute data.
//!
//! Exactly one typed vector is live per buffer. The variant doubles as
//! the buffer's [`NumericKind`], so the two can never disagree.

use crate::util::{AttributeScalar, Clamped8, Error, NumericKind, Result};

/// Owned element storage of one numeric kind.
#[derive(Clone, PartialEq, Debug)]
pub enum AttributeStorage {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<Clamped8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Run `$body` with `$v` bound to the live vector, whatever its element type.
macro_rules! with_storage {
    ($storage:expr, $v:ident => $body:expr) => {
        match $storage {
            AttributeStorage::Int8($v) => $body,
            AttributeStorage::Uint8($v) => $body,
            AttributeStorage::Uint8Clamped($v) => $body,
            AttributeStorage::Int16($v) => $body,
            AttributeStorage::Uint16($v) => $body,
            AttributeStorage::Int32($v) => $body,
            AttributeStorage::Uint32($v) => $body,
            AttributeStorage::Float32($v) => $body,
            AttributeStorage::Float64($v) => $body,
        }
    };
}

#[inline]
fn store_all<T: AttributeScalar>(dst: &mut [T], src: &[f64]) {
    for (slot, &value) in dst.iter_mut().zip(src) {
        *slot = T::from_f64(value);
    }
}

fn cast<A: AttributeScalar, B: AttributeScalar>(values: Vec<A>) -> Result<Vec<B>> {
    bytemuck::allocation::try_cast_vec(values)
        .map_err(|(e, _)| Error::other(format!("storage cast failed: {e}")))
}

impl AttributeStorage {
    /// Allocate `len` zeroed elements of `kind`.
    pub fn zeroed(kind: NumericKind, len: usize) -> Self {
        use bytemuck::allocation::zeroed_vec;
        match kind {
            NumericKind::Int8 => Self::Int8(zeroed_vec(len)),
            NumericKind::Uint8 => Self::Uint8(zeroed_vec(len)),
            NumericKind::Uint8Clamped => Self::Uint8Clamped(zeroed_vec(len)),
            NumericKind::Int16 => Self::Int16(zeroed_vec(len)),
            NumericKind::Uint16 => Self::Uint16(zeroed_vec(len)),
            NumericKind::Int32 => Self::Int32(zeroed_vec(len)),
            NumericKind::Uint32 => Self::Uint32(zeroed_vec(len)),
            NumericKind::Float32 => Self::Float32(zeroed_vec(len)),
            NumericKind::Float64 => Self::Float64(zeroed_vec(len)),
        }
    }

    /// Adopt an existing typed vector without copying.
    pub fn from_vec<T: AttributeScalar>(values: Vec<T>) -> Result<Self> {
        Ok(match T::KIND {
            NumericKind::Int8 => Self::Int8(cast(values)?),
            NumericKind::Uint8 => Self::Uint8(cast(values)?),
            NumericKind::Uint8Clamped => Self::Uint8Clamped(cast(values)?),
            NumericKind::Int16 => Self::Int16(cast(values)?),
            NumericKind::Uint16 => Self::Uint16(cast(values)?),
            NumericKind::Int32 => Self::Int32(cast(values)?),
            NumericKind::Uint32 => Self::Uint32(cast(values)?),
            NumericKind::Float32 => Self::Float32(cast(values)?),
            NumericKind::Float64 => Self::Float64(cast(values)?),
        })
    }

    /// The kind of the live vector.
    pub const fn kind(&self) -> NumericKind {
        match self {
            Self::Int8(_) => NumericKind::Int8,
            Self::Uint8(_) => NumericKind::Uint8,
            Self::Uint8Clamped(_) => NumericKind::Uint8Clamped,
            Self::Int16(_) => NumericKind::Int16,
            Self::Uint16(_) => NumericKind::Uint16,
            Self::Int32(_) => NumericKind::Int32,
            Self::Uint32(_) => NumericKind::Uint32,
            Self::Float32(_) => NumericKind::Float32,
            Self::Float64(_) => NumericKind::Float64,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        with_storage!(self, v => v.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw bytes of the live vector, in native endianness.
    pub fn as_bytes(&self) -> &[u8] {
        with_storage!(self, v => bytemuck::cast_slice(v.as_slice()))
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        with_storage!(self, v => bytemuck::cast_slice_mut(v.as_mut_slice()))
    }

    /// Typed view, or `None` if `T` is not this storage's element type.
    pub fn as_slice<T: AttributeScalar>(&self) -> Option<&[T]> {
        (T::KIND == self.kind()).then(|| bytemuck::cast_slice(self.as_bytes()))
    }

    /// Mutable typed view, or `None` if `T` is not this storage's element type.
    pub fn as_mut_slice<T: AttributeScalar>(&mut self) -> Option<&mut [T]> {
        if T::KIND != self.kind() {
            return None;
        }
        Some(bytemuck::cast_slice_mut(self.as_bytes_mut()))
    }

    /// Element at `index`, widened to `f64`.
    #[inline]
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_storage!(self, v => v.get(index).map(|x| x.to_f64()))
    }

    /// Convert and store `values` starting at element `offset`.
    ///
    /// Elements that would land past the end are dropped; callers bound-check first.
    pub fn store_f64(&mut self, offset: usize, values: &[f64]) {
        with_storage!(self, v => {
            if let Some(dst) = v.get_mut(offset..) {
                store_all(dst, values);
            }
        })
    }

    /// Widen every element to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        with_storage!(self, v => v.iter().map(|x| x.to_f64()).collect())
    }

    /// Copy `len` elements from `other[src..]` into `self[dst..]`; both must share a kind.
    pub(crate) fn copy_within_kind(&mut self, dst: usize, other: &Self, src: usize, len: usize) -> Result<()> {
        let width = self.kind().byte_width();
        if other.kind() != self.kind() {
            return Err(Error::type_mismatch(self.kind(), other.kind()));
        }
        let from = &other.as_bytes()[src * width..(src + len) * width];
        self.as_bytes_mut()[dst * width..(dst + len) * width].copy_from_slice(from);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_every_kind() {
        for kind in NumericKind::ALL {
            let s = AttributeStorage::zeroed(kind, 6);
            assert_eq!(s.kind(), kind);
            assert_eq!(s.len(), 6);
            assert_eq!(s.as_bytes().len(), 6 * kind.byte_width());
            assert!(s.to_f64_vec().iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn test_from_vec_keeps_kind() {
        let s = AttributeStorage::from_vec(vec![1u16, 2, 3]).unwrap();
        assert_eq!(s, AttributeStorage::Uint16(vec![1, 2, 3]));

        let s = AttributeStorage::from_vec(vec![Clamped8(7)]).unwrap();
        assert_eq!(s.kind(), NumericKind::Uint8Clamped);
    }

    #[test]
    fn test_typed_views() {
        let mut s = AttributeStorage::zeroed(NumericKind::Float32, 3);
        assert!(s.as_slice::<f64>().is_none());
        assert!(s.as_slice::<u8>().is_none());

        s.as_mut_slice::<f32>().unwrap()[1] = 2.5;
        assert_eq!(s.as_slice::<f32>().unwrap(), &[0.0, 2.5, 0.0]);

        let clamped = AttributeStorage::zeroed(NumericKind::Uint8Clamped, 2);
        assert!(clamped.as_slice::<u8>().is_none());
        assert!(clamped.as_slice::<Clamped8>().is_some());
    }

    #[test]
    fn test_store_f64_converts() {
        let mut s = AttributeStorage::zeroed(NumericKind::Int8, 4);
        s.store_f64(1, &[1.9, 200.0, -3.0]);
        assert_eq!(s, AttributeStorage::Int8(vec![0, 1, -56, -3]));

        let mut s = AttributeStorage::zeroed(NumericKind::Uint8Clamped, 2);
        s.store_f64(0, &[300.0, -1.0]);
        assert_eq!(s.get_f64(0), Some(255.0));
        assert_eq!(s.get_f64(1), Some(0.0));
        assert_eq!(s.get_f64(2), None);
    }

    #[test]
    fn test_copy_within_kind() {
        let src = AttributeStorage::Int32(vec![1, 2, 3, 4]);
        let mut dst = AttributeStorage::zeroed(NumericKind::Int32, 4);
        dst.copy_within_kind(0, &src, 2, 2).unwrap();
        assert_eq!(dst, AttributeStorage::Int32(vec![3, 4, 0, 0]));

        let other = AttributeStorage::zeroed(NumericKind::Uint32, 4);
        assert!(matches!(
            dst.copy_within_kind(0, &other, 0, 1),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
