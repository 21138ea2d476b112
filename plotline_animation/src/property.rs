// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities an object needs to be animated.

use alloc::vec::Vec;

use crate::animation::Animation;
use crate::value::Value;

/// Named, dynamically typed property access.
///
/// Properties are addressed by name. An object that wants percent and pixel
/// values of one property bridged during animation also answers the hybrid
/// names `pixel<Name>` (the resolved pixel amount) and `relative<Name>` (the
/// relative amount, `0..=1`), for example `pixelWidth` and `relativeWidth`.
///
/// ```
/// use plotline_animation::{PropertyAccess, Value};
///
/// #[derive(Default)]
/// struct Circle {
///     radius: f64,
/// }
///
/// impl PropertyAccess for Circle {
///     fn get_property(&self, name: &str) -> Option<Value> {
///         match name {
///             "radius" => Some(Value::Number(self.radius)),
///             _ => None,
///         }
///     }
///
///     fn set_property(&mut self, name: &str, value: Value) {
///         if let ("radius", Value::Number(r)) = (name, value) {
///             self.radius = r;
///         }
///     }
/// }
///
/// let mut circle = Circle::default();
/// circle.set_property("radius", Value::Number(4.0));
/// assert_eq!(circle.get_property("radius"), Some(Value::Number(4.0)));
/// ```
pub trait PropertyAccess {
    /// Reads a property, or `None` if the object has no such property.
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Writes a property. Unknown names and mismatched values are ignored.
    fn set_property(&mut self, name: &str, value: Value);
}

/// An object that keeps track of the animations running on it.
///
/// The list is maintained by [`Animation`]: a started animation adds itself
/// and a finished or killed one removes itself. Implementors only store it.
pub trait Animatable: PropertyAccess {
    /// The animations currently attached to this object.
    fn animations(&self) -> &[Animation];

    /// Mutable access to the attached animations.
    fn animations_mut(&mut self) -> &mut Vec<Animation>;
}
