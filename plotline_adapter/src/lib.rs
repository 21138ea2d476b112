// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotline Adapter: priority-ordered value transformation chains.
//!
//! Before an object hands out a computed value (a label's text, a column's
//! fill) it runs the value through its [`Adapter`]. Themes and plugins hook
//! in by registering callbacks under the value's key.
//!
//! - [`AdapterKey`]: a named channel with a value type.
//! - [`AdapterFn`]: a callback `(value, target, key) -> value` with identity.
//! - [`Adapter`]: the per-object chain, ordered by priority then
//!   registration.
//! - [`GlobalAdapter`]: shared class-wide callbacks, applied after the
//!   object's own.
//! - [`AdapterTarget`]: how an object answers "are you a `Class`?".
//!
//! ## Quick Start
//!
//! ```rust
//! use plotline_adapter::{Adapter, AdapterFn, AdapterKey, AdapterTarget, GlobalAdapter};
//!
//! struct Column {
//!     value: f64,
//! }
//! impl AdapterTarget for Column {}
//!
//! const FILL: AdapterKey<&'static str> = AdapterKey::new("fill");
//!
//! let theme = GlobalAdapter::new();
//! theme.add_all::<Column, _>(FILL, AdapterFn::new(|fill, _, _| fill), 0);
//!
//! let mut adapter = Adapter::with_global(theme);
//! adapter.add(
//!     FILL,
//!     AdapterFn::new(|fill, column: &Column, _| if column.value < 0.0 { "red" } else { fill }),
//!     0,
//! );
//!
//! assert_eq!(adapter.apply(&Column { value: -1.0 }, FILL, "blue"), "red");
//! assert_eq!(adapter.apply(&Column { value: 1.0 }, FILL, "blue"), "blue");
//!
//! // Leave the next value alone.
//! adapter.disable_key_for(FILL, 1);
//! assert_eq!(adapter.apply(&Column { value: -1.0 }, FILL, "blue"), "blue");
//! ```

#![no_std]

extern crate alloc;

mod adapter;
mod global;
mod key;

pub use adapter::Adapter;
pub use global::{AdapterTarget, GlobalAdapter};
pub use key::{AdapterFn, AdapterKey};
