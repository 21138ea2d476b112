// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What an animation changes.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::property::PropertyAccess;
use crate::value::Value;

/// A custom interpolation: `(from, to, progress) -> value`.
pub type UpdateFn = Rc<dyn Fn(&Value, &Value, f64) -> Value>;

/// One property driven by an [`Animation`](crate::Animation).
///
/// By default the property lives on the animation's target. With
/// [`child`](Self::child) it lives on another object instead, for example a
/// label owned by the target.
///
/// ```
/// use plotline_animation::{AnimationOption, Value};
///
/// let fade = AnimationOption::new("opacity", 0.0).from(1.0);
/// assert_eq!(fade.property(), "opacity");
/// assert_eq!(fade.from_value(), Some(&Value::Number(1.0)));
/// ```
#[derive(Clone)]
pub struct AnimationOption {
    pub(crate) property: Cow<'static, str>,
    pub(crate) from: Option<Value>,
    pub(crate) to: Value,
    pub(crate) child: Option<Rc<RefCell<dyn PropertyAccess>>>,
    pub(crate) update: Option<UpdateFn>,
}

impl AnimationOption {
    /// Animates `property` towards `to`, starting from its current value.
    pub fn new(property: impl Into<Cow<'static, str>>, to: impl Into<Value>) -> Self {
        Self {
            property: property.into(),
            from: None,
            to: to.into(),
            child: None,
            update: None,
        }
    }

    /// Starts from `from` instead of the property's current value.
    #[must_use]
    pub fn from(mut self, from: impl Into<Value>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Animates the property on `child` rather than on the target.
    #[must_use]
    pub fn child<C: PropertyAccess + 'static>(mut self, child: Rc<RefCell<C>>) -> Self {
        self.child = Some(child);
        self
    }

    /// Interpolates with `update` instead of the built-in rules.
    #[must_use]
    pub fn update_with(mut self, update: impl Fn(&Value, &Value, f64) -> Value + 'static) -> Self {
        self.update = Some(Rc::new(update));
        self
    }

    /// The animated property.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The start value, if known.
    #[must_use]
    pub fn from_value(&self) -> Option<&Value> {
        self.from.as_ref()
    }

    /// The end value.
    #[must_use]
    pub fn to_value(&self) -> &Value {
        &self.to
    }

    /// Returns `true` if the property lives on a child object.
    #[must_use]
    pub fn has_child(&self) -> bool {
        self.child.is_some()
    }

    /// Returns `true` if both options drive the same property of the same
    /// object.
    #[must_use]
    pub fn same_path(&self, other: &Self) -> bool {
        self.property == other.property
            && match (&self.child, &other.child) {
                (None, None) => true,
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                _ => false,
            }
    }

    pub(crate) fn read<P: PropertyAccess + ?Sized>(&self, target: &P, name: &str) -> Option<Value> {
        match &self.child {
            Some(child) => child.borrow().get_property(name),
            None => target.get_property(name),
        }
    }
}

impl fmt::Debug for AnimationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOption")
            .field("property", &self.property)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("child", &self.child.is_some())
            .field("update", &self.update.is_some())
            .finish()
    }
}
