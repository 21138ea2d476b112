// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by release actions.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

/// A failure reported while releasing a resource.
///
/// Release actions created with [`Disposer::try_new`](crate::Disposer::try_new)
/// may fail. The disposer is still marked as disposed before the action runs,
/// so a failing action is never retried.
///
/// Composite disposers ([`MultiDisposer`](crate::MultiDisposer) and friends)
/// keep releasing their remaining children when one fails and report every
/// failure at the end through [`DisposeError::Aggregate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisposeError {
    /// A single release action failed.
    Release(Cow<'static, str>),
    /// Several release actions failed during one composite disposal.
    ///
    /// Failures are listed in the order the children were disposed.
    Aggregate(Vec<Self>),
}

impl DisposeError {
    /// Creates a [`DisposeError::Release`] with the given message.
    #[must_use]
    pub fn release(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Release(message.into())
    }

    /// Folds a list of failures into a single result.
    ///
    /// No failures yield `Ok(())`, one failure is returned as-is, and several
    /// are wrapped in [`DisposeError::Aggregate`].
    ///
    /// ```
    /// use plotline_disposer::DisposeError;
    ///
    /// assert_eq!(DisposeError::combine(Vec::new()), Ok(()));
    ///
    /// let one = DisposeError::combine(vec![DisposeError::release("a")]);
    /// assert_eq!(one, Err(DisposeError::release("a")));
    ///
    /// let two = DisposeError::combine(vec![
    ///     DisposeError::release("a"),
    ///     DisposeError::release("b"),
    /// ]);
    /// assert_eq!(two.unwrap_err().failure_count(), 2);
    /// ```
    pub fn combine(mut errors: Vec<Self>) -> Result<(), Self> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(Self::Aggregate(errors)),
        }
    }

    /// Returns the number of individual release failures this error carries.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        match self {
            Self::Release(_) => 1,
            Self::Aggregate(errors) => errors.iter().map(Self::failure_count).sum(),
        }
    }
}

impl fmt::Display for DisposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release(message) => write!(f, "release action failed: {message}"),
            Self::Aggregate(errors) => {
                write!(f, "{} release actions failed", self.failure_count())?;
                for error in errors {
                    write!(f, "; {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl core::error::Error for DisposeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn nested_aggregates_count_leaves() {
        let err = DisposeError::Aggregate(vec![
            DisposeError::release("a"),
            DisposeError::Aggregate(vec![DisposeError::release("b"), DisposeError::release("c")]),
        ]);
        assert_eq!(err.failure_count(), 3);
    }

    #[test]
    fn display_lists_every_failure() {
        let err = DisposeError::Aggregate(vec![
            DisposeError::release("first"),
            DisposeError::release("second"),
        ]);
        let text = format!("{err}");
        assert!(text.starts_with("2 release actions failed"));
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }
}
