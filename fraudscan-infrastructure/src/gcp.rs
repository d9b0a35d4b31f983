// Google Cloud REST plumbing shared by the storage, prediction and
// document adapters.
pub mod auth;
pub mod http;

pub use auth::*;
pub use http::*;
