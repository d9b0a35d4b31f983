pub mod firestore_results;
pub mod firestore_value;
pub mod gcs_object_store;
pub mod memory;

pub use firestore_results::*;
pub use firestore_value::*;
pub use gcs_object_store::*;
pub use memory::*;
