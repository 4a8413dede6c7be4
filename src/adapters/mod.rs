//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! backends.
//!
//! Adapter categories:
//! - `storage`: file-per-key durable storage and an in-memory variant
//!   for tests

pub mod storage;

pub use storage::{FileStorage, MemoryStorage};
