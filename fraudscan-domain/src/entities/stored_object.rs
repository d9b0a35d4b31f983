// Object store entity

use serde::{Deserialize, Serialize};

/// Handle returned after a blob write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub name: String,
    pub bucket: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
}
