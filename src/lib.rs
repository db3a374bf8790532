//! A hash table which resolves collisions by separate chaining, built on a
//! doubly linked list that keeps its nodes in a flat Vec.
//!
//! ```
//! use chained_table::{Error, HashTable};
//!
//! let mut table = HashTable::new();
//! table.set("one", 1);
//! table.set("two", 2);
//! table.set("two", 5);
//!
//! assert_eq!(2, table.len());
//! assert_eq!(Ok(&5), table.get("two"));
//! assert_eq!(Err(Error::KeyNotFound), table.get("three"));
//! ```
//!
//! With the `shared_table` feature (on by default) a `SharedTable` puts the
//! table behind a lock so it can be handed to other threads.

mod error;
mod hash_table;
mod linked_list;
#[cfg(feature = "shared_table")]
mod shared_table;

pub use error::{Error, Result};
pub use hash_table::{HashTable, Iter, DEFAULT_BUCKET_COUNT};
pub use linked_list::{Iter as ListIter, LinkedList};
#[cfg(feature = "shared_table")]
pub use shared_table::SharedTable;

/// Installs an env_logger for the test binary. Safe to call from every test.
#[cfg(test)]
pub(crate) fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}
