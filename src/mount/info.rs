use serde::{Deserialize, Serialize};

/// One filesystem mount on the target host.
///
/// Deserialization accepts both our field names and the ansible fact names
/// (`mount`, `size_total`, `size_available`), so a raw facts document can be
/// fed in without reshaping.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MountInfo {
    #[serde(alias = "mount")]
    pub mount_point: String,
    #[serde(alias = "size_total")]
    pub total_bytes: u64,
    #[serde(alias = "size_available")]
    pub available_bytes: u64,
}

impl MountInfo {
    /// Bytes currently consumed on this mount.
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }
}
