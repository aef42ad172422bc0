pub mod file;
pub mod memory;
pub mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{load_json_or_default, save_json, KeyValueStore, StoreKey};
