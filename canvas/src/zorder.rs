//! Stacking-order allocation for boxes and the template sidebar.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

/// Hands out strictly increasing stacking-order values.
///
/// The counter starts at 0; each allocation increments it and returns
/// `floor + counter`. Values are never reused or rolled back.
///
/// The engine passes the sidebar's resting value as `floor`, so every box
/// raised by a drag stays above the resting sidebar.
#[derive(Debug, Clone, Default)]
pub struct ZOrderAllocator {
    floor: i64,
    counter: i64,
}

impl ZOrderAllocator {
    /// Allocator whose first value is `floor + 1`.
    #[must_use]
    pub fn new(floor: i64) -> Self {
        Self { floor, counter: 0 }
    }

    /// Increment the counter and return the new top value.
    pub fn allocate_next(&mut self) -> i64 {
        self.counter += 1;
        self.floor + self.counter
    }

    /// The highest value handed out so far, or `floor` if none yet.
    #[must_use]
    pub fn current_max(&self) -> i64 {
        self.floor + self.counter
    }

    /// Number of values allocated so far.
    #[must_use]
    pub fn allocated(&self) -> i64 {
        self.counter
    }
}
