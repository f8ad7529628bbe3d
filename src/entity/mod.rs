pub mod enricher;
pub mod extract;
pub mod resolver;
pub mod types;

pub use types::*;

// Module-level constants
pub const TARGET_ENTITY: &str = "entity";
