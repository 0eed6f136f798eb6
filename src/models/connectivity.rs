//! Connectivity test checklist data model.

use serde::{Deserialize, Serialize};

/// One row of the troubleshooting checklist (`PC1 a PC2`, result, fix...).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityTest {
    pub test: String,
    /// Free text, usually `Sí` / `No` or empty while pending.
    #[serde(default)]
    pub succeeded: String,
    #[serde(default)]
    pub problems: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub verified: String,
}

impl ConnectivityTest {
    pub fn new(test: &str) -> ConnectivityTest {
        ConnectivityTest {
            test: test.to_string(),
            ..Default::default()
        }
    }
}
