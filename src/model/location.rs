//! Hosted cloud locations

use serde::{Deserialize, Serialize};

/// A location hosted by the cloud backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudLocation {
    pub id: String,
    pub name: String,
}

impl CloudLocation {
    /// Default upload target used by the diagnostic action
    pub fn sample_path(&self) -> String {
        format!("location/{}/hello.txt", self.id)
    }
}
