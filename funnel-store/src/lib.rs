//! FUNNEL Store - Storage Port and Typed Adapter
//!
//! Defines the raw key-value port (`KvBackend`), its in-memory and JSON-file
//! implementations, and the typed `Store` adapter every service goes through.
//!
//! The adapter's read path never fails: backend faults and malformed JSON are
//! logged and degrade to empty collections or `None`. Write faults are logged
//! and swallowed as well. Mutations are whole-collection read-modify-write
//! cycles; there are no partial updates and no cross-process coordination
//! (last writer wins at key granularity).

pub mod adapter;
pub mod backend;
pub mod file;

pub use adapter::Store;
pub use backend::{KvBackend, MemoryBackend};
pub use file::JsonFileBackend;
