// Domain entities
pub mod prediction;
pub mod results;
pub mod runtime_config;
pub mod stored_object;
pub mod transaction;

pub use prediction::*;
pub use results::*;
pub use runtime_config::*;
pub use stored_object::*;
pub use transaction::*;
