// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing functions.
//!
//! Every function maps elapsed time in `[0, 1]` to progress. Most start at 0
//! and end at 1; the elastic and bounce families overshoot in between.
//! [`cubic_out`] is the default for new animations.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Constant speed.
#[must_use]
pub fn linear(t: f64) -> f64 {
    t
}

/// Quadratic, accelerating.
#[must_use]
pub fn quad_in(t: f64) -> f64 {
    t * t
}

/// Quadratic, decelerating.
#[must_use]
pub fn quad_out(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Quadratic, accelerating then decelerating.
#[must_use]
pub fn quad_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t / 2.0
    } else {
        let t = t - 1.0;
        (t * (2.0 - t) + 1.0) / 2.0
    }
}

/// Cubic, accelerating.
#[must_use]
pub fn cubic_in(t: f64) -> f64 {
    t * t * t
}

/// Cubic, decelerating.
#[must_use]
pub fn cubic_out(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t + 1.0
}

/// Cubic, accelerating then decelerating.
#[must_use]
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// `t^exponent`.
pub fn poly_in(exponent: f64) -> impl Fn(f64) -> f64 + Copy {
    move |t| t.powf(exponent)
}

/// `1 - (1 - t)^exponent`.
pub fn poly_out(exponent: f64) -> impl Fn(f64) -> f64 + Copy {
    move |t| 1.0 - (1.0 - t).powf(exponent)
}

/// [`poly_in`] for the first half, [`poly_out`] for the second.
pub fn poly_in_out(exponent: f64) -> impl Fn(f64) -> f64 + Copy {
    move |t| {
        let t = t * 2.0;
        if t <= 1.0 {
            t.powf(exponent) / 2.0
        } else {
            (2.0 - (2.0 - t).powf(exponent)) / 2.0
        }
    }
}

/// Exponential, accelerating.
#[must_use]
pub fn exp_in(t: f64) -> f64 {
    2_f64.powf(10.0 * t - 10.0)
}

/// Exponential, decelerating.
#[must_use]
pub fn exp_out(t: f64) -> f64 {
    1.0 - 2_f64.powf(-10.0 * t)
}

/// Exponential, accelerating then decelerating.
#[must_use]
pub fn exp_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        2_f64.powf(10.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2_f64.powf(10.0 - 10.0 * t)) / 2.0
    }
}

/// Sinusoidal, accelerating.
#[must_use]
pub fn sin_in(t: f64) -> f64 {
    1.0 - (t * FRAC_PI_2).cos()
}

/// Sinusoidal, decelerating.
#[must_use]
pub fn sin_out(t: f64) -> f64 {
    (t * FRAC_PI_2).sin()
}

/// Sinusoidal, accelerating then decelerating.
#[must_use]
pub fn sin_in_out(t: f64) -> f64 {
    (1.0 - (PI * t).cos()) / 2.0
}

/// Circular, accelerating.
#[must_use]
pub fn circle_in(t: f64) -> f64 {
    1.0 - (1.0 - t * t).sqrt()
}

/// Circular, decelerating.
#[must_use]
pub fn circle_out(t: f64) -> f64 {
    let t = t - 1.0;
    (1.0 - t * t).sqrt()
}

/// Circular, accelerating then decelerating.
#[must_use]
pub fn circle_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        (1.0 - (1.0 - t * t).sqrt()) / 2.0
    } else {
        let t = t - 2.0;
        ((1.0 - t * t).sqrt() + 1.0) / 2.0
    }
}

const B1: f64 = 4.0 / 11.0;
const B2: f64 = 6.0 / 11.0;
const B3: f64 = 8.0 / 11.0;
const B4: f64 = 3.0 / 4.0;
const B5: f64 = 9.0 / 11.0;
const B6: f64 = 10.0 / 11.0;
const B7: f64 = 15.0 / 16.0;
const B8: f64 = 21.0 / 22.0;
const B9: f64 = 63.0 / 64.0;
const B0: f64 = 1.0 / B1 / B1;

/// Bouncing into the end value.
#[must_use]
pub fn bounce_out(t: f64) -> f64 {
    if t < B1 {
        B0 * t * t
    } else if t < B3 {
        let t = t - B2;
        B0 * t * t + B4
    } else if t < B6 {
        let t = t - B5;
        B0 * t * t + B7
    } else {
        let t = t - B8;
        B0 * t * t + B9
    }
}

/// Bouncing away from the start value.
#[must_use]
pub fn bounce_in(t: f64) -> f64 {
    1.0 - bounce_out(1.0 - t)
}

/// Bouncing at both ends.
#[must_use]
pub fn bounce_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        (1.0 - bounce_out(1.0 - t)) / 2.0
    } else {
        (bounce_out(t - 1.0) + 1.0) / 2.0
    }
}

const ELASTIC_PERIOD: f64 = 0.3;
// Phase for unit amplitude: asin(1) * period / tau.
const ELASTIC_PHASE: f64 = ELASTIC_PERIOD / 4.0;

/// Spring-like, overshooting before it starts.
#[must_use]
pub fn elastic_in(t: f64) -> f64 {
    let t = t - 1.0;
    2_f64.powf(10.0 * t) * ((ELASTIC_PHASE - t) / ELASTIC_PERIOD * TAU).sin()
}

/// Spring-like, overshooting the end value.
#[must_use]
pub fn elastic_out(t: f64) -> f64 {
    1.0 - 2_f64.powf(-10.0 * t) * ((t + ELASTIC_PHASE) / ELASTIC_PERIOD * TAU).sin()
}

/// Spring-like at both ends.
#[must_use]
pub fn elastic_in_out(t: f64) -> f64 {
    let t = t * 2.0 - 1.0;
    if t < 0.0 {
        2_f64.powf(10.0 * t) * ((ELASTIC_PHASE - t) / ELASTIC_PERIOD * TAU).sin() / 2.0
    } else {
        (2.0 - 2_f64.powf(-10.0 * t) * ((ELASTIC_PHASE + t) / ELASTIC_PERIOD * TAU).sin()) / 2.0
    }
}
