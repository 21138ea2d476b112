// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Misuse of an [`EventDispatcher`](crate::EventDispatcher).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventError {
    /// The dispatcher was used after it was disposed.
    Disposed,
    /// `copy_from` was called with the dispatcher itself as the source.
    CopyFromSelf,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disposed => f.write_str("event dispatcher is disposed"),
            Self::CopyFromSelf => f.write_str("cannot copy listeners from the same dispatcher"),
        }
    }
}

impl core::error::Error for EventError {}
