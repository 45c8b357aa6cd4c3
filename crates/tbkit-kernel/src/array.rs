//! Component arrays
//!
//! [`SlotArray<T>`] declares a fixed-size family of sibling slots sharing a
//! basename and distinguished by element index, rendered `basename[index]`.

use std::fmt;
use std::ops::Index;
use std::slice;

use crate::component::Component;
use crate::slot::Slot;

/// Fixed-size family of sibling slots, one payload per element.
///
/// Elements register in index order at declaration, so the fallback cascade
/// also constructs them in index order. Each element keeps its index in its
/// rendered name, whether constructed explicitly or by the cascade.
pub struct SlotArray<T: Component> {
    slots: Vec<Slot<T>>,
}

impl<T: Component> SlotArray<T> {
    /// Declare `len` elements, registered and indexed in order
    #[must_use]
    pub fn with_len(len: u32) -> Self {
        let slots = (0..len)
            .map(|index| {
                let slot = Slot::new();
                slot.assign_index(index);
                slot
            })
            .collect();
        Self { slots }
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the array has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Element at `index`, if in bounds
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    /// Iterator over the elements in index order
    pub fn iter(&self) -> slice::Iter<'_, Slot<T>> {
        self.slots.iter()
    }
}

impl<T: Component> Index<usize> for SlotArray<T> {
    type Output = Slot<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slots[index]
    }
}

impl<'a, T: Component> IntoIterator for &'a SlotArray<T> {
    type Item = &'a Slot<T>;
    type IntoIter = slice::Iter<'a, Slot<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

impl<T: Component> fmt::Debug for SlotArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotArray")
            .field("len", &self.slots.len())
            .finish()
    }
}
