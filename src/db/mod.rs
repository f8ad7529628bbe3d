// Re-export the Database struct and the cache-key rule
mod cache;
pub mod core;
mod schema;

pub use self::cache::cache_key;
pub use self::core::Database;
