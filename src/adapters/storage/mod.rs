//! Storage Adapters - Concrete `KeyValueStorage` Backends

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
