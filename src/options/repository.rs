use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Repository", inline)]
#[serde(default)]
/// Endpoints of the public structure repository.
pub struct RepositoryOptions {
    /// Base URL for raw structure downloads (`{base}/{ID}.pdb`).
    #[schemars(title = "Structure File URL")]
    pub structure_file_url: String,
    /// Base URL of the REST API (`{base}/core/entry/{ID}`).
    #[schemars(title = "Metadata API URL")]
    pub metadata_api_url: String,
    /// Per-request timeout.
    #[schemars(title = "Timeout (seconds)", range(min = 1, max = 300))]
    pub timeout_secs: u64,
    /// Largest structure file body accepted from the repository.
    #[schemars(title = "Max Download Size (bytes)")]
    pub max_download_bytes: u64,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            structure_file_url: "https://files.rcsb.org/download".into(),
            metadata_api_url: "https://data.rcsb.org/rest/v1".into(),
            timeout_secs: 30,
            max_download_bytes: 50 * 1024 * 1024,
        }
    }
}
