// Catalog Storage Layer
//
// Abstract whole-object byte storage with pluggable backends

pub mod trait_;
pub mod memory;
pub mod file;

pub use trait_::*;
pub use memory::{MemoryStorage, create_memory_storage};
pub use file::{FileStorage, atomic_write};
