// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whether a write would leave a slot unchanged.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;

/// Decides whether writing `other` over `self` changes anything.
///
/// Collections skip writes (and their events) when the stored value and the
/// new one are the same. For plain data that is equality, which is what the
/// default method does. Shared handles compare by identity instead: a second
/// `Rc` with equal contents is a different value and replaces the first.
///
/// ```
/// use std::rc::Rc;
/// use plotline_collections::Identity;
///
/// #[derive(Clone, PartialEq)]
/// struct Tick(u32);
/// impl Identity for Tick {}
///
/// assert!(Tick(1).is_same(&Tick(1)));
///
/// let a = Rc::new("x");
/// assert!(a.is_same(&a.clone()));
/// assert!(!a.is_same(&Rc::new("x")));
/// ```
pub trait Identity: PartialEq {
    /// Returns `true` if `other` is the very value stored in `self`.
    fn is_same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: PartialEq + ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: Identity> Identity for Option<T> {
    fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.is_same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: Identity, B: Identity> Identity for (A, B) {
    fn is_same(&self, other: &Self) -> bool {
        self.0.is_same(&other.0) && self.1.is_same(&other.1)
    }
}

macro_rules! by_value {
    ($($ty:ty),* $(,)?) => {
        $(impl Identity for $ty {})*
    };
}

by_value!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String,
);

impl Identity for &'static str {}

impl Identity for Cow<'static, str> {}
