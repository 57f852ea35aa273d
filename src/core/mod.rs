//! Parsing, merging and resolution logic.
//!
//! Everything under `core` is synchronous and free of I/O: callers pass
//! full snapshots in and get new collections back.

pub mod dates;
pub mod events;
pub mod identity;
pub mod records;
pub mod resolver;
pub mod roster;
pub mod rows;
pub mod workspace;
