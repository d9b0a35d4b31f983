// Domain value objects
pub mod upload_filename;

pub use upload_filename::*;
