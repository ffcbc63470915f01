//! Doubly linked list whose nodes sit in a [`SlotArena`].
//!
//! Links are `SlotId`s rather than pointers. A caller that remembers the id
//! returned by [`IntrusiveList::push_back`] can later unlink that node or send
//! it to the back without walking the list. The sub-caches pair a list with a
//! key → id map and get O(1) reordering out of it.
//!
//! ```text
//!   head                                   tail
//!    │                                       │
//!    ▼                                       ▼
//!   (x) ──next──► (y) ──next──► (z)
//!   (x) ◄──prev── (y) ◄──prev── (z)
//! ```
//!
//! Values enter at the tail, so the head is always the entry that has waited
//! longest: the first to leave a FIFO queue or the least recently touched
//! entry of an LRU ordering. [`IntrusiveList::check_links`] walks the chain and
//! reports the first broken link instead of panicking.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list; see the module docs.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Pre-sizes the arena for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Value at the head, i.e. the longest-waiting one.
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Head-to-tail walk over values.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            current: self.head,
        }
    }

    /// Head-to-tail walk that also yields each node's id.
    pub fn iter_entries(&self) -> IntrusiveListEntryIter<'_, T> {
        IntrusiveListEntryIter {
            list: self,
            current: self.head,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Links `value` in at the tail. Keep the returned id to reach the node later.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.append(id);
        id
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Unlinks `id` and hands back its value; `None` for a stale id.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Relinks `id` at the tail. `false` means the id is not live.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.tail != Some(id) {
            self.detach(id);
            self.append(id);
        }
        true
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Makes `right` follow `left`. A `None` side stands for the list end, so
    /// the head or tail is updated instead of a node.
    fn join(&mut self, left: Option<SlotId>, right: Option<SlotId>) {
        match left.and_then(|id| self.arena.get_mut(id)) {
            Some(node) => node.next = right,
            None => self.head = right,
        }
        match right.and_then(|id| self.arena.get_mut(id)) {
            Some(node) => node.prev = left,
            None => self.tail = left,
        }
    }

    fn append(&mut self, id: SlotId) {
        let last = self.tail;
        self.join(last, Some(id));
        self.join(Some(id), None);
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let node = self.arena.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());
        self.join(prev, next);
        Some(())
    }

    /// Walks the chain from the head and checks that every `prev` link
    /// mirrors the `next` link before it, that the walk ends at the tail and
    /// that it visits exactly `len()` nodes.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        let mut visited = 0usize;
        let mut behind: Option<SlotId> = None;
        let mut cursor = self.head;

        while let Some(id) = cursor {
            let Some(node) = self.arena.get(id) else {
                return Err(InvariantError::new(format!(
                    "list link points at vacant slot {}",
                    id.index()
                )));
            };
            if node.prev != behind {
                return Err(InvariantError::new(format!(
                    "node {} has a stale prev link",
                    id.index()
                )));
            }
            visited += 1;
            // a cycle would otherwise keep us walking forever
            if visited > self.len() {
                return Err(InvariantError::new("list chain is longer than its node count"));
            }
            behind = Some(id);
            cursor = node.next;
        }

        if behind != self.tail {
            return Err(InvariantError::new("list walk did not end at the tail"));
        }
        if visited != self.len() {
            return Err(InvariantError::new(format!(
                "list reaches {visited} nodes but stores {}",
                self.len()
            )));
        }
        Ok(())
    }
}

/// Returned by [`IntrusiveList::iter`].
pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Returned by [`IntrusiveList::iter_entries`].
pub struct IntrusiveListEntryIter<'a, T> {
    list: &'a IntrusiveList<T>,
    current: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListEntryIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((id, &node.value))
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}
