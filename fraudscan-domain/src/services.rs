// Domain services: pure functions over parsed rows and prediction payloads
pub mod csv_parser;
pub mod date_normalizer;
pub mod pagination;
pub mod prediction_alignment;

pub use csv_parser::*;
pub use date_normalizer::*;
pub use pagination::*;
pub use prediction_alignment::*;
