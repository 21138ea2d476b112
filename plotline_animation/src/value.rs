// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animatable property values.

use alloc::borrow::Cow;
use core::fmt;

use kurbo::Point;
use peniko::Color;

/// A property value as seen by the animation engine.
///
/// Only some variants interpolate smoothly: numbers, percents, colors and
/// points. Everything else switches from the start value to the end value
/// halfway through.
#[derive(Clone)]
pub enum Value {
    /// A plain number, usually pixels.
    Number(f64),
    /// A relative amount in percent units; `Percent(50.0)` is half.
    Percent(f64),
    /// An sRGB color.
    Color(Color),
    /// A position.
    Point(Point),
    /// A flag.
    Bool(bool),
    /// Text or an enumerated keyword.
    Text(Cow<'static, str>),
}

impl Value {
    /// Returns the number if this is a [`Value::Number`].
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the percent amount if this is a [`Value::Percent`].
    #[must_use]
    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Self::Percent(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the color if this is a [`Value::Color`].
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Interpolates between two values of the same smooth variant.
    ///
    /// At `t >= 1` the result is exactly `to`. Returns `None` when the pair
    /// cannot be interpolated.
    ///
    /// ```
    /// use plotline_animation::Value;
    ///
    /// let mid = Value::Number(0.0).lerp(&Value::Number(10.0), 0.25);
    /// assert_eq!(mid, Some(Value::Number(2.5)));
    /// assert_eq!(Value::Bool(false).lerp(&Value::Bool(true), 0.5), None);
    /// ```
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f64) -> Option<Self> {
        let value = match (self, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(lerp_f64(*a, *b, t)),
            (Self::Percent(a), Self::Percent(b)) => Self::Percent(lerp_f64(*a, *b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(lerp_color(*a, *b, t)),
            (Self::Point(a), Self::Point(b)) => {
                if t >= 1.0 {
                    Self::Point(*b)
                } else {
                    Self::Point(a.lerp(*b, t))
                }
            }
            _ => return None,
        };
        Some(value)
    }
}

/// Linear interpolation that lands exactly on `b` once `t` reaches one.
#[must_use]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 { b } else { a + (b - a) * t }
}

/// Straight per-channel RGBA interpolation.
#[must_use]
pub fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    if t >= 1.0 {
        return b;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "progress from f64 to f32 is enough for color channels"
    )]
    let t = t as f32;
    let [r0, g0, b0, a0] = a.components;
    let [r1, g1, b1, a1] = b.components;
    Color::new([
        r0 + (r1 - r0) * t,
        g0 + (g1 - g0) * t,
        b0 + (b1 - b0) * t,
        a0 + (a1 - a0) * t,
    ])
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) | (Self::Percent(a), Self::Percent(b)) => a == b,
            (Self::Color(a), Self::Color(b)) => a.components == b.components,
            (Self::Point(a), Self::Point(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Percent(p) => f.debug_tuple("Percent").field(p).finish(),
            Self::Color(c) => f.debug_tuple("Color").field(&c.components).finish(),
            Self::Point(p) => f.debug_tuple("Point").field(p).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Point> for Value {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}
