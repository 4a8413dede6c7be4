//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `KeyValueStorage`: whole-value string persistence (the
//!   localStorage analogue)

pub mod storage;

pub use storage::KeyValueStorage;
