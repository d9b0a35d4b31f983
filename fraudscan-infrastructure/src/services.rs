pub mod static_prediction;
pub mod vertex_prediction;

pub use static_prediction::*;
pub use vertex_prediction::*;
