//! Exclusive-ownership handle for heap-allocated records.

use crate::error::{Result, TrackError};

/// Move-only wrapper owning zero or one heap-allocated value.
///
/// A handle is either empty or the sole owner of one allocation. Moving the
/// handle moves ownership; the type implements neither `Copy` nor `Clone`,
/// so two owners of the same allocation cannot exist. Dropping a non-empty
/// handle frees the allocation exactly once.
///
/// Accessors hand out plain borrows, which are non-owning by construction:
/// a caller cannot retain one past the owner's next mutation.
pub struct OwningHandle<T: ?Sized> {
    value: Option<Box<T>>,
}

impl<T: ?Sized> OwningHandle<T> {
    /// Creates an empty handle owning nothing.
    pub fn empty() -> Self {
        Self { value: None }
    }

    /// Takes ownership of an already-boxed value.
    pub fn from_boxed(value: Box<T>) -> Self {
        Self { value: Some(value) }
    }

    /// Returns `true` if the handle currently owns a value.
    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// Borrows the owned value.
    ///
    /// Fails with [`TrackError::NullAccess`] when the handle is empty.
    pub fn get(&self) -> Result<&T> {
        self.value
            .as_deref()
            .ok_or(TrackError::NullAccess { operation: "read" })
    }

    /// Mutably borrows the owned value.
    ///
    /// Fails with [`TrackError::NullAccess`] when the handle is empty.
    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.value
            .as_deref_mut()
            .ok_or(TrackError::NullAccess { operation: "write" })
    }

    /// Borrows the owned value if one is present.
    pub fn as_ref(&self) -> Option<&T> {
        self.value.as_deref()
    }

    /// Mutably borrows the owned value if one is present.
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.value.as_deref_mut()
    }

    /// Gives up ownership of the held value, leaving the handle empty.
    ///
    /// The caller becomes the sole owner of the returned allocation. Fails
    /// with [`TrackError::NullAccess`] when there is nothing to extract.
    pub fn release(&mut self) -> Result<Box<T>> {
        self.value
            .take()
            .ok_or(TrackError::NullAccess { operation: "release" })
    }

    /// Destroys any held value, then takes ownership of `value`.
    pub fn reset(&mut self, value: Box<T>) {
        self.value = Some(value);
    }

    /// Destroys any held value, leaving the handle empty.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Exchanges ownership with `other` without allocating.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.value, &mut other.value);
    }
}

impl<T> OwningHandle<T> {
    /// Allocates `value` and wraps it in one step, so a freshly constructed
    /// value is never left outside a handle.
    pub fn wrap(value: T) -> Self {
        Self {
            value: Some(Box::new(value)),
        }
    }
}

impl<T: ?Sized> Default for OwningHandle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> std::fmt::Debug for OwningHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwningHandle")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
