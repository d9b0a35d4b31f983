pub mod config;
pub mod gcp;
pub mod repositories;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::*;
pub use gcp::*;
pub use repositories::*;
pub use services::*;
pub use utils::*;
