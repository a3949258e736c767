//! Log store backend implementations

pub mod file;
pub mod memory;
pub mod rest;

pub use file::FileBackend;
pub use memory::{MemoryBackend, Tables};
pub use rest::RestBackend;
