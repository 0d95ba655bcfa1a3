pub mod file_store;
pub mod ledger;
pub mod memory_store;
pub mod registry;
pub mod store_trait;

pub use file_store::FileStore;
pub use ledger::SignLedger;
pub use memory_store::MemoryStore;
pub use registry::StoreRegistry;
pub use store_trait::KeyValueStore;
