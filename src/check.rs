// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The image-data size check.
//!
//! One forward pass: resolve the etcd mount, derive the byte limit, measure
//! each host in order, and stop at the first host that fails or exceeds the
//! limit. Hosts are checked sequentially so the report always names the
//! first problem in list order, not the first to respond.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{CheckConfig, CheckDefaults};
use crate::error::Result;
use crate::measure::{KeySizeExecutor, MeasurementRequest};
use crate::mount::{resolve_etcd_mount, MountInfo};

/// Final verdict for one check run.
///
/// `changed` is always false: the check never mutates the cluster.
#[derive(Serialize, Debug, Clone)]
pub struct CheckReport {
    pub failed: bool,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl CheckReport {
    fn passed() -> Self {
        Self {
            failed: false,
            changed: false,
            msg: None,
        }
    }

    fn failure(msg: String) -> Self {
        Self {
            failed: true,
            changed: false,
            msg: Some(msg),
        }
    }
}

/// Checks that the OpenShift image data stored in etcd stays within the
/// recommended size limit.
pub struct ImageDataSizeChecker {
    config: CheckConfig,
    executor: Box<dyn KeySizeExecutor>,
}

impl ImageDataSizeChecker {
    pub fn new(config: CheckConfig, executor: Box<dyn KeySizeExecutor>) -> Self {
        Self { config, executor }
    }

    /// Run the check against the given mount list.
    ///
    /// Fails with an error only for a missing mount point; measurement
    /// problems come back as a failed [`CheckReport`].
    pub async fn run(&self, mounts: &[MountInfo]) -> Result<CheckReport> {
        let etcd_mount = resolve_etcd_mount(mounts)?;

        let size_limit = self
            .config
            .size_limit_bytes
            .unwrap_or_else(|| derive_size_limit(etcd_mount));
        debug!(
            mount = %etcd_mount.mount_point,
            size_limit_bytes = size_limit,
            "resolved etcd mount"
        );

        let mut failures: Vec<String> = Vec::new();

        for host in &self.config.hosts {
            let request = MeasurementRequest::new(size_limit, host, &self.config);
            debug!(host = %host, "measuring image data size");
            let result = self.executor.measure(&request).await?;

            let msg = if result.is_failure() {
                Some(format!(
                    "Failed to retrieve stats for etcd host \"{host}\": {reason}",
                    reason = result.reason()
                ))
            } else if result.size_limit_exceeded {
                Some(format!(
                    "The size of OpenShift image data stored in etcd host \"{host}\" \
                     exceeds the maximum recommended limit of {limit:.2} GB. \
                     Use the `oadm prune images` command to cleanup unused Docker images.",
                    limit = to_gigabytes(size_limit)
                ))
            } else {
                None
            };

            if let Some(msg) = msg {
                warn!(host = %host, "image data check failed");
                if self.config.report_all_failures {
                    failures.push(msg);
                } else {
                    return Ok(CheckReport::failure(msg));
                }
            }
        }

        if !failures.is_empty() {
            return Ok(CheckReport::failure(failures.join("\n")));
        }

        info!(
            hosts = self.config.hosts.len(),
            "image data size within limit on all etcd hosts"
        );
        Ok(CheckReport::passed())
    }
}

/// Default byte limit: half of the space already used on the etcd mount.
fn derive_size_limit(mount: &MountInfo) -> u64 {
    (CheckDefaults::USED_SPACE_LIMIT_RATIO * mount.used_bytes() as f64) as u64
}

/// Convert a byte count to gigabytes (10^9 bytes).
pub fn to_gigabytes(bytes: u64) -> f64 {
    bytes as f64 / 10f64.powi(9)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(path: &str, total: u64, available: u64) -> MountInfo {
        MountInfo {
            mount_point: path.to_string(),
            total_bytes: total,
            available_bytes: available,
        }
    }

    #[test]
    fn test_derive_size_limit() {
        assert_eq!(derive_size_limit(&mount("/", 100, 40)), 30);
        assert_eq!(derive_size_limit(&mount("/", 75, 40)), 17);
        assert_eq!(derive_size_limit(&mount("/", 10, 10)), 0);
    }

    #[test]
    fn test_to_gigabytes() {
        assert_eq!(format!("{:.2}", to_gigabytes(5_000_000_000)), "5.00");
        assert_eq!(format!("{:.2}", to_gigabytes(1_250_000_000)), "1.25");
        assert_eq!(format!("{:.2}", to_gigabytes(0)), "0.00");
    }
}
