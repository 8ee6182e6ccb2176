//! # Chained Hash Table
//!
//! A Rust implementation of a hash table with separate chaining.
//!
//! `ChainedHashTable` keeps an array of buckets, each a chain of key-value
//! entries. Keys are routed to a bucket by clearing the sign bit of their hash
//! and reducing it modulo the capacity. Before an insert would push the ratio of
//! entries to buckets past the maximum load factor (0.75 by default), the bucket
//! array doubles and every entry is moved to its new bucket.
//!
//! The crate also ships the small building blocks the table is usually taught
//! next to: a base-31 string hash, an arena-backed linked list and a binary
//! search tree with rotation helpers.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashTable;
//!
//! // Create a table with 5 buckets
//! let mut table = ChainedHashTable::new(5);
//!
//! // Insert values
//! table.insert("apple".to_string(), 1);
//! table.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(table.get("apple"), Some(&1));
//!
//! // Removal needs the stored value as well as the key
//! assert!(!table.remove("apple", &10));
//! assert!(table.remove("apple", &1));
//! assert_eq!(table.get("apple"), None);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chainmap::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::new(5);
//! for key in ["a", "b", "c"] {
//!     table.insert(key, key.len());
//! }
//! assert_eq!(table.capacity(), 5);
//!
//! // A fourth entry would make the load factor 0.8, so the table doubles first
//! table.insert("d", 1);
//! assert_eq!(table.capacity(), 10);
//! assert!(table.load_factor() <= table.max_load_factor());
//! ```
//!
//! ## Custom configuration
//!
//! ```rust
//! use chainmap::{BuildPolynomialHasher, ChainedHashTable, TableConfig};
//!
//! let config = TableConfig::default().with_initial_capacity(8).with_max_load_factor(2.0);
//! let mut table: ChainedHashTable<String, u32, _> =
//!     ChainedHashTable::with_config_and_hasher(config, BuildPolynomialHasher::default())?;
//! table.insert("key".to_string(), 7);
//! assert_eq!(table.get("key"), Some(&7));
//! # Ok::<(), chainmap::ConfigError>(())
//! ```

/// Module implementing the separate-chaining hash table
mod chained_table;
/// Construction parameters and their validation
mod config;
/// Arena-backed singly linked list
pub mod linked_list;
/// Logger installation for binaries and tests
pub mod logger;
/// Base-31 polynomial string hashing
mod string_hash;
/// Binary search tree with rotation helpers
pub mod tree;
/// Utility functions and traits for the hash table
mod utils;

pub use chained_table::{ChainedHashTable, DefaultBuildHasher, Iter};
pub use config::{ConfigError, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, TableConfig};
pub use linked_list::LinkedList;
pub use string_hash::{BuildPolynomialHasher, PolynomialHasher, string_hash};
pub use tree::Tree;
pub use utils::TableExtensions;
