pub mod ops_handlers;
pub mod result_handlers;
pub mod upload_handlers;

pub use ops_handlers::*;
pub use result_handlers::*;
pub use upload_handlers::*;
