//! Typed, itemized attribute buffer.

use std::fmt;
use std::sync::Arc;

use super::AttributeStorage;
use crate::util::{
    AttributeLayout, AttributeScalar, Color, Error, NumericKind, Result, Vec2, Vec3, Vec4,
};

/// Hook the renderer binding fires after the buffer has been uploaded.
pub type UploadCallback = Arc<dyn Fn() + Send + Sync>;

/// One named channel of per-vertex data: positions, colors, indices, ...
///
/// Elements are grouped into items of `item_size` scalars. The element
/// kind and the total element count are fixed at construction: every
/// mutation writes in place and `len() == item_size() * count()` always
/// holds.
///
/// Copy operations validate shape, capacity and kind before touching a
/// single element. Marking the owning geometry for re-upload after a
/// successful copy is the caller's job.
#[derive(Clone)]
pub struct AttributeBuffer {
    storage: AttributeStorage,
    item_size: usize,
    normalized: bool,
    upload_callback: Option<UploadCallback>,
}

impl AttributeBuffer {
    /// Allocate a zeroed buffer of `count` items of `item_size` elements.
    pub fn new(kind: NumericKind, count: usize, item_size: usize, normalized: bool) -> Result<Self> {
        if item_size < 1 {
            return Err(Error::invalid("item size must be at least 1"));
        }
        let len = count
            .checked_mul(item_size)
            .ok_or_else(|| Error::invalid(format!("{count} items of size {item_size} overflow")))?;
        tracing::debug!(%kind, count, item_size, "allocating attribute buffer");
        Ok(Self {
            storage: AttributeStorage::zeroed(kind, len),
            item_size,
            normalized,
            upload_callback: None,
        })
    }

    /// Allocate a zeroed buffer described by `layout`.
    pub fn with_layout(layout: AttributeLayout, count: usize) -> Result<Self> {
        Self::new(layout.kind, count, layout.item_size, false)
    }

    /// Adopt an existing typed vector; its length must be a whole number of items.
    pub fn from_vec<T: AttributeScalar>(values: Vec<T>, item_size: usize, normalized: bool) -> Result<Self> {
        if item_size < 1 {
            return Err(Error::invalid("item size must be at least 1"));
        }
        if values.len() % item_size != 0 {
            return Err(Error::invalid(format!(
                "{} elements is not a whole number of items of size {item_size}",
                values.len()
            )));
        }
        Ok(Self {
            storage: AttributeStorage::from_vec(values)?,
            item_size,
            normalized,
            upload_callback: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> NumericKind {
        self.storage.kind()
    }

    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Number of items (`len() / item_size()`).
    #[inline]
    pub fn count(&self) -> usize {
        self.storage.len() / self.item_size
    }

    /// Number of scalar elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Whether integer data should be normalized when read by shaders.
    #[inline]
    pub fn normalized(&self) -> bool {
        self.normalized
    }

    #[inline]
    pub fn layout(&self) -> AttributeLayout {
        AttributeLayout::new(self.kind(), self.item_size)
    }

    #[inline]
    pub fn storage(&self) -> &AttributeStorage {
        &self.storage
    }

    /// Typed view of the elements, `None` if `T` is not this buffer's kind.
    #[inline]
    pub fn as_slice<T: AttributeScalar>(&self) -> Option<&[T]> {
        self.storage.as_slice()
    }

    /// Mutable typed view; the length cannot change through it.
    #[inline]
    pub fn as_mut_slice<T: AttributeScalar>(&mut self) -> Option<&mut [T]> {
        self.storage.as_mut_slice()
    }

    /// Raw element bytes, ready for upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_bytes()
    }

    /// Widen every element to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.storage.to_f64_vec()
    }

    // ========================================================================
    // Bulk copies
    // ========================================================================

    /// Replace the full contents with `source`.
    ///
    /// `source` must have this buffer's element type and exactly `len()`
    /// elements. The existing allocation is reused and never aliases
    /// `source`.
    pub fn copy_array<T: AttributeScalar>(&mut self, source: &[T]) -> Result<&mut Self> {
        let len = self.len();
        let kind = self.kind();
        let Some(dst) = self.storage.as_mut_slice::<T>() else {
            tracing::debug!(%kind, source = %T::KIND, "copy_array rejected: kind");
            return Err(Error::type_mismatch(kind, T::KIND));
        };
        if source.len() != len {
            tracing::debug!(expected = len, actual = source.len(), "copy_array rejected: length");
            return Err(Error::LengthMismatch {
                expected: len,
                actual: source.len(),
            });
        }
        dst.copy_from_slice(source);
        Ok(self)
    }

    /// Copy one item from `source[source_index]` into `self[index]`.
    pub fn copy_at(&mut self, index: usize, source: &AttributeBuffer, source_index: usize) -> Result<&mut Self> {
        if source.kind() != self.kind() {
            return Err(Error::type_mismatch(self.kind(), source.kind()));
        }
        if source.item_size != self.item_size {
            return Err(Error::InvalidShape {
                expected: self.item_size,
                actual: source.item_size,
            });
        }
        self.check_item(index)?;
        source.check_item(source_index)?;
        let size = self.item_size;
        self.storage
            .copy_within_kind(index * size, &source.storage, source_index * size, size)?;
        Ok(self)
    }

    /// Write `colors` as consecutive RGB items starting at item 0.
    ///
    /// Requires item size 3, at most `count()` colors and a floating point kind.
    /// Items past the last color are left as they were.
    pub fn copy_colors_array(&mut self, colors: &[Color]) -> Result<&mut Self> {
        self.copy_records("copy_colors_array", colors.iter().map(|c| c.to_array()))
    }

    /// Write `vectors` as consecutive 2-element items starting at item 0.
    pub fn copy_vector2s_array(&mut self, vectors: &[Vec2]) -> Result<&mut Self> {
        self.copy_records("copy_vector2s_array", vectors.iter().map(|v| v.to_array()))
    }

    /// Write `vectors` as consecutive 3-element items starting at item 0.
    pub fn copy_vector3s_array(&mut self, vectors: &[Vec3]) -> Result<&mut Self> {
        self.copy_records("copy_vector3s_array", vectors.iter().map(|v| v.to_array()))
    }

    /// Write `vectors` as consecutive 4-element items starting at item 0.
    pub fn copy_vector4s_array(&mut self, vectors: &[Vec4]) -> Result<&mut Self> {
        self.copy_records("copy_vector4s_array", vectors.iter().map(|v| v.to_array()))
    }

    /// Shared body of the structured copies: validate everything, then write.
    fn copy_records<const N: usize, I>(&mut self, op: &'static str, records: I) -> Result<&mut Self>
    where
        I: ExactSizeIterator<Item = [f32; N]>,
    {
        if self.item_size != N {
            tracing::debug!(op, expected = N, actual = self.item_size, "rejected: item size");
            return Err(Error::InvalidShape {
                expected: N,
                actual: self.item_size,
            });
        }
        let count = self.count();
        if records.len() > count {
            tracing::debug!(op, capacity = count, requested = records.len(), "rejected: overflow");
            return Err(Error::Overflow {
                capacity: count,
                requested: records.len(),
            });
        }
        match &mut self.storage {
            AttributeStorage::Float32(dst) => {
                for (item, record) in dst.chunks_exact_mut(N).zip(records) {
                    item.copy_from_slice(&record);
                }
            }
            AttributeStorage::Float64(dst) => {
                for (item, record) in dst.chunks_exact_mut(N).zip(records) {
                    for (slot, value) in item.iter_mut().zip(record) {
                        *slot = value as f64;
                    }
                }
            }
            other => {
                tracing::debug!(op, kind = %other.kind(), "rejected: kind does not hold floats");
                return Err(Error::type_mismatch("floating point kind", other.kind()));
            }
        }
        Ok(self)
    }

    // ========================================================================
    // Element access with conversion
    // ========================================================================

    /// Convert and store `values` starting at element `offset`.
    pub fn set(&mut self, values: &[f64], offset: usize) -> Result<&mut Self> {
        let capacity = self.len();
        if offset.checked_add(values.len()).map_or(true, |end| end > capacity) {
            return Err(Error::Overflow {
                capacity,
                requested: offset.saturating_add(values.len()),
            });
        }
        self.storage.store_f64(offset, values);
        Ok(self)
    }

    /// Component `component` of item `index`, widened to `f64`.
    pub fn get_component(&self, index: usize, component: usize) -> Option<f64> {
        if index >= self.count() || component >= self.item_size {
            return None;
        }
        self.storage.get_f64(index * self.item_size + component)
    }

    #[inline]
    pub fn get_x(&self, index: usize) -> Option<f64> {
        self.get_component(index, 0)
    }

    #[inline]
    pub fn get_y(&self, index: usize) -> Option<f64> {
        self.get_component(index, 1)
    }

    #[inline]
    pub fn get_z(&self, index: usize) -> Option<f64> {
        self.get_component(index, 2)
    }

    #[inline]
    pub fn get_w(&self, index: usize) -> Option<f64> {
        self.get_component(index, 3)
    }

    /// Store the leading components of item `index`; the rest are untouched.
    pub fn set_item(&mut self, index: usize, components: &[f64]) -> Result<&mut Self> {
        self.check_item(index)?;
        if components.len() > self.item_size {
            return Err(Error::InvalidShape {
                expected: self.item_size,
                actual: components.len(),
            });
        }
        self.storage.store_f64(index * self.item_size, components);
        Ok(self)
    }

    /// Store a single component of item `index`.
    pub fn set_component(&mut self, index: usize, component: usize, value: f64) -> Result<&mut Self> {
        self.check_item(index)?;
        if component >= self.item_size {
            return Err(Error::InvalidShape {
                expected: self.item_size,
                actual: component + 1,
            });
        }
        self.storage.store_f64(index * self.item_size + component, &[value]);
        Ok(self)
    }

    #[inline]
    pub fn set_x(&mut self, index: usize, x: f64) -> Result<&mut Self> {
        self.set_component(index, 0, x)
    }

    #[inline]
    pub fn set_y(&mut self, index: usize, y: f64) -> Result<&mut Self> {
        self.set_component(index, 1, y)
    }

    #[inline]
    pub fn set_z(&mut self, index: usize, z: f64) -> Result<&mut Self> {
        self.set_component(index, 2, z)
    }

    #[inline]
    pub fn set_w(&mut self, index: usize, w: f64) -> Result<&mut Self> {
        self.set_component(index, 3, w)
    }

    #[inline]
    pub fn set_xy(&mut self, index: usize, x: f64, y: f64) -> Result<&mut Self> {
        self.set_item(index, &[x, y])
    }

    #[inline]
    pub fn set_xyz(&mut self, index: usize, x: f64, y: f64, z: f64) -> Result<&mut Self> {
        self.set_item(index, &[x, y, z])
    }

    #[inline]
    pub fn set_xyzw(&mut self, index: usize, x: f64, y: f64, z: f64, w: f64) -> Result<&mut Self> {
        self.set_item(index, &[x, y, z, w])
    }

    fn check_item(&self, index: usize) -> Result<()> {
        let count = self.count();
        if index >= count {
            return Err(Error::ItemOutOfBounds { index, count });
        }
        Ok(())
    }

    // ========================================================================
    // Upload hook
    // ========================================================================

    /// Register the hook fired after upload, replacing any previous one.
    pub fn on_upload<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.upload_callback = Some(Arc::new(callback));
        self
    }

    /// The registered upload hook, if any. Never invoked by the buffer itself.
    #[inline]
    pub fn upload_callback(&self) -> Option<&UploadCallback> {
        self.upload_callback.as_ref()
    }
}

impl fmt::Debug for AttributeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeBuffer")
            .field("layout", &self.layout())
            .field("count", &self.count())
            .field("normalized", &self.normalized)
            .field("has_upload_callback", &self.upload_callback.is_some())
            .finish()
    }
}
