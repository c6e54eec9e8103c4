//! Sample catalog entries.

use serde::{Deserialize, Serialize};

/// Metadata for one installed sample.
///
/// The launcher only needs `id` to validate a launch; the remaining fields
/// are carried for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Sample {
    /// Construct a sample with only an id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            tags: Vec::new(),
        }
    }
}
