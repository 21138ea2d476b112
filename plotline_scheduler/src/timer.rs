// Copyright 2025 the Plotline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::scheduler::FrameCallback;

struct TimerEntry {
    deadline: f64,
    id: u64,
    callback: FrameCallback,
}

/// Pending timers, ordered by `(deadline, id)`.
#[derive(Default)]
pub(crate) struct TimerQueue {
    entries: Vec<TimerEntry>,
    next_id: u64,
}

impl TimerQueue {
    /// Inserts a timer and returns its id.
    pub(crate) fn insert(&mut self, deadline: f64, callback: FrameCallback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        // Ids are monotonic, so equal deadlines keep scheduling order.
        let index = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            index,
            TimerEntry {
                deadline,
                id,
                callback,
            },
        );
        id
    }

    pub(crate) fn cancel(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
    }

    /// The id the next inserted timer will receive.
    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Removes and returns the earliest timer that is due at `now` and was
    /// scheduled before `limit`.
    pub(crate) fn pop_due(&mut self, now: f64, limit: u64) -> Option<FrameCallback> {
        let index = self
            .entries
            .iter()
            .take_while(|e| e.deadline <= now)
            .position(|e| e.id < limit)?;
        Some(self.entries.remove(index).callback)
    }

    pub(crate) fn next_deadline(&self) -> Option<f64> {
        self.entries.first().map(|e| e.deadline)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
