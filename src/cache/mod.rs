pub mod memory_store;
pub mod token;
pub mod token_store;

pub use memory_store::MemoryTokenStore;
pub use token_store::{token_cache_key, TokenStore};
