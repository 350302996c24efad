//! Single counter with structural triggers.

use cnt_tree::{Node, Position};

use crate::integer::{MAX_SAFE_INTEGER, MIN_SAFE_INTEGER};

/// One integer counter with its reset and increment triggers.
///
/// Triggers are [`Position`] descriptors matched by exact equality against
/// the position of each visited node, so a trigger for `heading(2)` fires on
/// every level-2 heading and on nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleCounter {
    value: i64,
    reset_triggers: Vec<Position>,
    increment_triggers: Vec<Position>,
}

impl SimpleCounter {
    /// Create a counter starting at 0 with no triggers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reset trigger. `None` is a no-op.
    pub fn add_reset_trigger(&mut self, position: Option<Position>) {
        self.reset_triggers.extend(position);
    }

    /// Register an increment trigger. `None` is a no-op.
    pub fn add_increment_trigger(&mut self, position: Option<Position>) {
        self.increment_triggers.extend(position);
    }

    /// Overwrite the value, clamped to the safe integer range.
    pub fn set(&mut self, value: i64) {
        self.value = value.clamp(MIN_SAFE_INTEGER, MAX_SAFE_INTEGER);
    }

    /// Zero the counter if `node` matches a reset trigger.
    ///
    /// Returns whether a trigger matched.
    pub fn reset(&mut self, node: &Node) -> bool {
        let matched = self.reset_triggers.contains(&node.position());
        if matched {
            self.value = 0;
        }
        matched
    }

    /// Increment the counter if `node` matches an increment trigger.
    ///
    /// Returns whether a trigger matched.
    pub fn increment(&mut self, node: &Node) -> bool {
        let matched = self.increment_triggers.contains(&node.position());
        if matched {
            self.up();
        }
        matched
    }

    /// Increment and return the new value.
    pub fn up(&mut self) -> i64 {
        self.value = (self.value + 1).min(MAX_SAFE_INTEGER);
        self.value
    }

    /// Current value.
    #[must_use]
    pub fn look(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub fn reset_triggers(&self) -> &[Position] {
        &self.reset_triggers
    }

    #[must_use]
    pub fn increment_triggers(&self) -> &[Position] {
        &self.increment_triggers
    }
}
