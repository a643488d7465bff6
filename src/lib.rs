pub mod backing_store;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod replacement;
pub mod stats;
pub mod tlb;
pub mod translation;

// Re-export commonly used items for convenience
pub use backing_store::{BackingStore, FileBackingStore, MemoryBackingStore};
pub use config::Config;
pub use constants::*;
pub use error::{Error, Result};
pub use replacement::Policy;
pub use translation::{Access, Translation, Translator, VirtualAddress};
