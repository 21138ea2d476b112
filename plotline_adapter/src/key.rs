// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed adapter keys and adapter callbacks.

use alloc::rc::Rc;
use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A named channel whose values have type `T`.
///
/// Keys are usually declared once as constants next to the property they
/// adapt:
///
/// ```
/// use plotline_adapter::AdapterKey;
///
/// const FILL: AdapterKey<&'static str> = AdapterKey::new("fill");
/// assert_eq!(FILL.name(), "fill");
/// ```
///
/// Two keys are equal when both their names and value types match.
pub struct AdapterKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AdapterKey<T> {
    /// Creates a key.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The channel name.
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl<T: 'static> AdapterKey<T> {
    /// The [`TypeId`] of the values on this channel.
    #[must_use]
    #[inline]
    pub fn value_type(self) -> TypeId {
        TypeId::of::<T>()
    }
}

// Manual impls so `T` needs no bounds of its own.
impl<T> Copy for AdapterKey<T> {}

impl<T> Clone for AdapterKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for AdapterKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AdapterKey<T> {}

impl<T> Hash for AdapterKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> fmt::Debug for AdapterKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdapterKey").field(&self.name).finish()
    }
}

/// A transformation registered on an adapter.
///
/// The callback receives the current value, the object being adapted and the
/// key, and returns the replacement value. Clones share identity, which is
/// what [`Adapter::has`](crate::Adapter::has) compares.
pub struct AdapterFn<Target: ?Sized, T> {
    callback: Rc<dyn Fn(T, &Target, AdapterKey<T>) -> T>,
}

impl<Target: ?Sized, T> AdapterFn<Target, T> {
    /// Wraps `callback`.
    pub fn new(callback: impl Fn(T, &Target, AdapterKey<T>) -> T + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Runs the transformation.
    #[inline]
    pub fn call(&self, value: T, target: &Target, key: AdapterKey<T>) -> T {
        (self.callback)(value, target, key)
    }

    /// Returns `true` if both wrap the same callback.
    #[must_use]
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<Target: ?Sized, T> Clone for AdapterFn<Target, T> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
        }
    }
}

impl<Target: ?Sized, T> fmt::Debug for AdapterFn<Target, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdapterFn")
            .field(&Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_compare_by_name() {
        const A: AdapterKey<f64> = AdapterKey::new("x");
        let b = AdapterKey::<f64>::new("x");
        assert_eq!(A, b);
        assert_ne!(A, AdapterKey::new("y"));
        assert_eq!(A.value_type(), TypeId::of::<f64>());
    }

    #[test]
    fn clones_share_identity() {
        let f = AdapterFn::<(), i32>::new(|v, _, _| v + 1);
        let g = AdapterFn::<(), i32>::new(|v, _, _| v + 1);
        assert!(f.ptr_eq(&f.clone()));
        assert!(!f.ptr_eq(&g));
        assert_eq!(f.call(1, &(), AdapterKey::new("n")), 2);
    }
}
