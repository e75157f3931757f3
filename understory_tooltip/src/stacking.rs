// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global stacking registry: z-index allocation per overlay category.
//!
//! ## Allocation
//!
//! [`ZIndexStack`] keeps registrations in order. A new registration is placed
//! one above the most recent entry. When that entry belongs to a different
//! category, the new category's base is added on top so categories stay in
//! separate bands.
//!
//! ```
//! use understory_tooltip::stacking::{StackingRegistry, ZIndexStack};
//!
//! let mut stack = ZIndexStack::new();
//! assert_eq!(stack.register("tooltip", 1, 1100), 1101);
//! assert_eq!(stack.register("tooltip", 2, 1100), 1102);
//! assert_eq!(stack.register("modal", 3, 1000), 2103);
//! stack.unregister(2);
//! assert_eq!(stack.len(), 2);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

/// Z-index bookkeeping shared by every floating overlay.
///
/// Registrations are strictly paired: each `register` is matched by exactly
/// one `unregister` for the same element.
pub trait StackingRegistry<E> {
    /// Allocate a z-index for `el` in `category` and return it.
    fn register(&mut self, category: &str, el: E, base: i32) -> i32;

    /// Release the z-index held by `el`. Unknown elements are ignored.
    fn unregister(&mut self, el: E);
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry<E> {
    category: String,
    element: E,
    z_index: i32,
}

/// Ordered z-index stack.
#[derive(Clone, Debug)]
pub struct ZIndexStack<E> {
    entries: Vec<Entry<E>>,
}

impl<E> Default for ZIndexStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ZIndexStack<E> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest z-index currently held in `category`.
    pub fn current(&self, category: &str) -> Option<i32> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.category == category)
            .map(|e| e.z_index)
    }
}

impl<E: Copy + Eq> ZIndexStack<E> {
    /// The z-index held by `el`, if registered.
    pub fn z_index_of(&self, el: E) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.element == el)
            .map(|e| e.z_index)
    }
}

impl<E: Copy + Eq> StackingRegistry<E> for ZIndexStack<E> {
    fn register(&mut self, category: &str, el: E, base: i32) -> i32 {
        let z_index = match self.entries.last() {
            Some(last) if last.category == category => last.z_index.saturating_add(1),
            Some(last) => last.z_index.saturating_add(base).saturating_add(1),
            None => base.saturating_add(1),
        };
        self.entries.push(Entry {
            category: category.into(),
            element: el,
            z_index,
        });
        z_index
    }

    fn unregister(&mut self, el: E) {
        self.entries.retain(|e| e.element != el);
    }
}
