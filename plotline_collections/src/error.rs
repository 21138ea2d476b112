// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Invalid use of an observable collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionError {
    /// An index outside the valid range for the operation.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },
    /// `insert_key` on a key that is already present.
    KeyExists,
    /// `update_key` on a key that is not present.
    KeyMissing,
    /// A range whose start is after its end.
    InvalidRange {
        /// Requested start.
        start: usize,
        /// Requested end.
        end: usize,
    },
}

impl CollectionError {
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfBounds { index, len })
        }
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} is out of bounds (length {len})")
            }
            Self::KeyExists => f.write_str("key already exists"),
            Self::KeyMissing => f.write_str("key does not exist"),
            Self::InvalidRange { start, end } => {
                write!(f, "range start {start} is after end {end}")
            }
        }
    }
}

impl core::error::Error for CollectionError {}
