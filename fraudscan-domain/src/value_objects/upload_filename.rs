// Upload filename value object

use std::fmt;

use serde::{Deserialize, Serialize};

const CSV_EXTENSION: &str = ".csv";

/// Why a submitted filename cannot be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameRejection {
    Empty,
    NotCsv,
}

/// Original filename of an accepted upload. Used as the blob key and as the
/// `filename` of every document derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadFilename(String);

impl UploadFilename {
    pub fn parse(raw: &str) -> Result<Self, FilenameRejection> {
        if raw.is_empty() {
            return Err(FilenameRejection::Empty);
        }
        if !raw.ends_with(CSV_EXTENSION) {
            return Err(FilenameRejection::NotCsv);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
