use serde::{Deserialize, Serialize};

/// A single hazard scenario produced by the upstream generator.
///
/// The description text is the hazard's identity: downstream annotation is
/// matched back to the source record by comparing descriptions, so the
/// kernel never rewrites it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardRecord {
    /// Position of the hazard within its assessment run.
    pub id: String,
    /// Free-form hazard scenario text, read-only to the kernel.
    pub description: String,
}

impl HazardRecord {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}
