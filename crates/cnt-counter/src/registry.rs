//! Named counter registry.

use std::collections::HashMap;

use cnt_tree::{Node, Position};

use crate::SimpleCounter;

/// Mapping from counter name to [`SimpleCounter`].
///
/// Counters are kept in definition order. One registry lives for exactly one
/// document resolution.
#[derive(Debug, Clone, Default)]
pub struct CounterRegistry {
    entries: Vec<(String, SimpleCounter)>,
    index: HashMap<String, usize>,
}

impl CounterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name`, registering `position` as a reset trigger.
    ///
    /// Redefinition keeps the current value and only adds the trigger.
    pub fn define(&mut self, name: &str, position: Option<Position>) {
        let idx = if let Some(&idx) = self.index.get(name) {
            idx
        } else {
            tracing::debug!(name, "Defined counter");
            let idx = self.entries.len();
            self.index.insert(name.to_owned(), idx);
            self.entries.push((name.to_owned(), SimpleCounter::new()));
            idx
        };
        if let Some(position) = position {
            tracing::debug!(name, %position, "Registered reset trigger");
        }
        self.entries[idx].1.add_reset_trigger(position);
    }

    /// Register `position` as an increment trigger of `name`.
    ///
    /// Returns `false` without side effects when `name` is not defined.
    pub fn add_increment_trigger(&mut self, name: &str, position: Option<Position>) -> bool {
        let Some(counter) = self.get_mut(name) else {
            return false;
        };
        counter.add_increment_trigger(position);
        if let Some(position) = position {
            tracing::debug!(name, %position, "Registered increment trigger");
        }
        true
    }

    /// Set the value of `name`. Undefined names are ignored.
    pub fn set(&mut self, name: &str, value: i64) {
        if let Some(counter) = self.get_mut(name) {
            counter.set(value);
        }
    }

    /// Increment `name` and return the new value, `None` if undefined.
    pub fn up(&mut self, name: &str) -> Option<i64> {
        self.get_mut(name).map(SimpleCounter::up)
    }

    /// Current value of `name`, `None` if undefined.
    #[must_use]
    pub fn look(&self, name: &str) -> Option<i64> {
        self.get(name).map(SimpleCounter::look)
    }

    /// Fire the triggers matching `node`.
    ///
    /// Every counter is offered the reset first; increments run only after
    /// all resets, so a counter that both resets and increments on the same
    /// node ends at 1.
    pub fn trigger(&mut self, node: &Node) {
        for (name, counter) in &mut self.entries {
            if counter.reset(node) {
                tracing::debug!(name = name.as_str(), position = %node.position(), "Reset counter");
            }
        }
        for (name, counter) in &mut self.entries {
            if counter.increment(node) {
                tracing::debug!(
                    name = name.as_str(),
                    position = %node.position(),
                    value = counter.look(),
                    "Incremented counter"
                );
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SimpleCounter> {
        self.index.get(name).map(|&idx| &self.entries[idx].1)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut SimpleCounter> {
        self.index.get(name).map(|&idx| &mut self.entries[idx].1)
    }

    /// Whether `name` is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Counter names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
