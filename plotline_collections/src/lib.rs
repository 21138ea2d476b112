// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plotline Collections: observable lists and maps.
//!
//! Charts keep their series, data items and per-key sub-resources in
//! collections that announce every structural change through an
//! [`EventDispatcher`](plotline_events::EventDispatcher):
//!
//! - [`List`]: index-addressable sequence ([`ListEvent`]).
//! - [`Dictionary`]: key-unique map ([`DictionaryEvent`]) with get-or-create.
//! - [`OrderedList`] and [`SortedList`]: the list decides the order
//!   ([`OrderedListEvent`]). `SortedList` binary-searches with a comparator.
//! - [`ListTemplate`], [`DictionaryTemplate`], [`OrderedListTemplate`]:
//!   members are cloned from a [`Template`] prototype.
//! - [`IndexedIterable`]: a lazy `[start, end)` window, walkable backwards.
//! - [`Identity`]: decides whether a write is a no-op (`Rc` handles by
//!   pointer, plain data by value).
//! - [`order`]: ordering helpers and the sorted-slice binary search.
//!
//! Events are emitted synchronously after the mutation took effect, and only
//! for kinds that have listeners; unobserved collections build no payloads.
//! Mutations take `&mut self`, so listeners observe but cannot mutate the
//! collection that is notifying them.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use plotline_collections::{Dictionary, DictionaryEvent, DictionaryEventKind};
//! use plotline_events::Handler;
//!
//! let mut dict = Dictionary::new();
//! let set_keys = Rc::new(Cell::new(0));
//! {
//!     let set_keys = set_keys.clone();
//!     dict.events()
//!         .on(
//!             DictionaryEventKind::SetKey,
//!             Handler::new(move |_: &DictionaryEvent<&'static str, i32>| set_keys.set(set_keys.get() + 1)),
//!             None,
//!             true,
//!         )
//!         .unwrap();
//! }
//!
//! dict.set_key("k", 1);
//! dict.set_key("k", 1); // equal value: nothing happens
//! assert_eq!(set_keys.get(), 0);
//! dict.set_key("k", 2);
//! assert_eq!(set_keys.get(), 1);
//! ```

#![no_std]

extern crate alloc;

mod dictionary;
mod error;
mod identity;
mod iterable;
mod list;
pub mod order;
mod ordered;
mod template;

pub use dictionary::{Dictionary, DictionaryEvent, DictionaryEventKind};
pub use error::CollectionError;
pub use identity::Identity;
pub use iterable::{IndexedIter, IndexedIterable};
pub use list::{List, ListEvent, ListEventKind};
pub use ordered::{Comparator, OrderedList, OrderedListEvent, OrderedListEventKind, SortedList};
pub use template::{DictionaryTemplate, ListTemplate, OrderedListTemplate, Template};
