//! Vector-backed storage addressed by [`SlotId`].
//!
//! A removed value leaves a hole that the next insert fills, so storage
//! stays as large as the peak number of live values. Handles are plain
//! indexes with no generation counter: whoever removes a value must also
//! forget its handle, otherwise it will alias whatever lands in the hole.

/// Handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Position in the backing vector.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    holes: Vec<usize>,
    live: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            holes: Vec::new(),
            live: 0,
        }
    }

    /// Stores `value`, reusing the most recently vacated slot if there is one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.live += 1;
        match self.holes.pop() {
            Some(hole) => {
                self.slots[hole] = Some(value);
                SlotId(hole)
            },
            None => {
                self.slots.push(Some(value));
                SlotId(self.slots.len() - 1)
            },
        }
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0).and_then(Option::take)?;
        self.holes.push(id.0);
        self.live -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    pub fn contains(&self, id: SlotId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drops every value; the vector's allocation is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.holes.clear();
        self.live = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
