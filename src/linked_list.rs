//! A doubly linked list that flattens all its nodes onto a Vec for storage.
//! Nodes point at each other by their position in the Vec rather than by
//! pointer, so the list owns every node outright and nothing is shared.

use std::{fmt, iter::FromIterator};

use crate::error::{Error, Result};

/// Alias for the index of a node in the linked list's storage vec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeHandle(usize);

/// A node that lives in a linked list.
#[derive(Debug)]
struct Node<T> {
    /// The value being stored.
    value: T,

    /// The index of the node previous to this one, if any.
    prev: Option<NodeHandle>,

    /// The index of the next node in the list, if any.
    next: Option<NodeHandle>,
}

#[cold]
#[inline(never)]
fn vacant_slot() -> ! {
    panic!("linked list handle points at a vacant slot");
}

/// A doubly linked list with O(1) insertion at either end and O(n) search
/// and removal.
///
/// The nodes sit in a single contiguous Vec and are addressed by their
/// position in it. Removing a node vacates its slot and freelists it; the
/// next insertion writes a fresh node into the hole. There is no compaction.
///
/// The length is a counter kept alongside the chain, so [`len`](Self::len)
/// never walks the list.
pub struct LinkedList<T> {
    /// Node slots. `None` marks a slot sitting on the freelist.
    store: Vec<Option<Node<T>>>,

    /// Slots which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// The first node in the list.
    head: Option<NodeHandle>,

    /// The last node in the list.
    tail: Option<NodeHandle>,

    /// Number of linked nodes.
    size: usize,
}

impl<T> LinkedList<T> {
    /// Creates a new, empty linked list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new linked list with room for `capacity` nodes before the
    /// storage vec has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            size: 0,
        }
    }

    /// The length of this linked list.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The value at the head of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|head| &self.node(head).value)
    }

    /// The value at the tail of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|tail| &self.node(tail).value)
    }

    /// Inserts `item` at the tail of the list.
    pub fn append(&mut self, item: T) {
        let idx = self.alloc(Node {
            value: item,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(idx),
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
        self.size += 1;

        #[cfg(test)]
        self.continuity_test();
    }

    /// Inserts `item` at the head of the list.
    pub fn prepend(&mut self, item: T) {
        let idx = self.alloc(Node {
            value: item,
            prev: None,
            next: self.head,
        });

        match self.head {
            Some(head) => self.node_mut(head).prev = Some(idx),
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
        self.size += 1;

        #[cfg(test)]
        self.continuity_test();
    }

    /// Deletes the first node, scanning from the head, whose value equals
    /// `item`.
    pub fn delete(&mut self, item: &T) -> Result<()>
    where
        T: PartialEq,
    {
        self.remove_first(|value| value == item).map(drop)
    }

    /// Unlinks the first node, scanning from the head, whose value satisfies
    /// `predicate`, and hands back its value.
    ///
    /// Fails with [`Error::EmptyContainer`] on an empty list and
    /// [`Error::ValueNotFound`] when nothing matches. The list is untouched in
    /// either case.
    pub fn remove_first<P>(&mut self, mut predicate: P) -> Result<T>
    where
        P: FnMut(&T) -> bool,
    {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }

        let found = self
            .handles()
            .find(|&handle| predicate(&self.node(handle).value));

        match found {
            Some(handle) => Ok(self.unlink(handle)),
            None => Err(Error::ValueNotFound),
        }
    }

    /// Returns the first value, from the head, which satisfies `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    /// Like [`find`](Self::find), but hands out a mutable reference so the
    /// value can be changed in place.
    pub fn find_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let found = self
            .handles()
            .find(|&handle| predicate(&self.node(handle).value))?;

        Some(&mut self.node_mut(found).value)
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|value| value == item)
    }

    /// Iterates over the values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.size,
        }
    }

    /// Copies every value out into a Vec, head first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Clears this linked list. Does not free the underlying buffers.
    pub fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.size = 0;

        #[cfg(test)]
        self.continuity_test();
    }

    /// Walks the chain of handles from the head.
    fn handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        std::iter::successors(self.head, move |&handle| self.node(handle).next)
    }

    fn node(&self, handle: NodeHandle) -> &Node<T> {
        match self.store.get(handle.0) {
            Some(Some(node)) => node,
            _ => vacant_slot(),
        }
    }

    fn node_mut(&mut self, handle: NodeHandle) -> &mut Node<T> {
        match self.store.get_mut(handle.0) {
            Some(Some(node)) => node,
            _ => vacant_slot(),
        }
    }

    /// Places `node` in the first free slot, or at the end of the storage vec
    /// if there isn't one.
    fn alloc(&mut self, node: Node<T>) -> NodeHandle {
        match self.free.pop() {
            Some(idx) => {
                self.store[idx.0] = Some(node);
                idx
            }
            None => {
                self.store.push(Some(node));
                NodeHandle(self.store.len() - 1)
            }
        }
    }

    /// Takes a linked node out of the chain, stitching its neighbours (or the
    /// head and tail) back together, and freelists its slot.
    fn unlink(&mut self, handle: NodeHandle) -> T {
        let node = match self.store.get_mut(handle.0).and_then(Option::take) {
            Some(node) => node,
            None => vacant_slot(),
        };

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }

        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(handle);
        self.size -= 1;

        #[cfg(test)]
        self.continuity_test();

        node.value
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        assert_eq!(self.head.is_none(), self.size == 0);
        assert_eq!(self.tail.is_none(), self.size == 0);

        if let Some(head) = self.head {
            assert_eq!(None, self.node(head).prev);
        }
        if let Some(tail) = self.tail {
            assert_eq!(None, self.node(tail).next);
        }

        // walk forwards, checking every back link on the way
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            assert_eq!(prev, node.prev);
            count += 1;
            assert!(count <= self.size);
            prev = Some(handle);
            cursor = node.next;
        }
        assert_eq!(self.tail, prev);
        assert_eq!(self.size, count);

        // and backwards
        count = 0;
        cursor = self.tail;
        while let Some(handle) = cursor {
            count += 1;
            assert!(count <= self.size);
            cursor = self.node(handle).prev;
        }
        assert_eq!(self.size, count);

        assert_eq!(self.store.len(), self.size + self.free.len());
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinkedList({:?})", self)
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward iterator over a [`LinkedList`], head to tail.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}
