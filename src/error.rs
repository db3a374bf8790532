//! The ways a lookup or removal can come up empty.

use thiserror::Error;

/// Failures reported by [`LinkedList`](crate::LinkedList) and
/// [`HashTable`](crate::HashTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The key has no pair in the table.
    #[error("key is not in the hash table")]
    KeyNotFound,

    /// Tried to delete from a list with no nodes.
    #[error("cannot delete from an empty linked list")]
    EmptyContainer,

    /// The list has nodes, but none of them matched.
    #[error("value is not in the linked list")]
    ValueNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
