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

//! Resolution of the mount backing the etcd data directory.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::mount::info::MountInfo;

/// Candidate mount paths for the etcd data directory, in priority order.
///
/// The first path present in the mount list wins; overlaps are resolved by
/// this fixed precedence, never by size.
pub const ETCD_MOUNT_CANDIDATES: [&str; 4] = ["/var/lib/etcd", "/var/lib", "/var", "/"];

/// Pick the mount that backs the etcd data directory.
///
/// Duplicate mount paths in the input are not rejected; the last entry wins.
/// Fails with [`Error::MountpointNotFound`] when none of the candidate paths
/// is mounted, listing every path that was.
pub fn resolve_etcd_mount(mounts: &[MountInfo]) -> Result<&MountInfo> {
    let mount_for_path: HashMap<&str, &MountInfo> = mounts
        .iter()
        .map(|mnt| (mnt.mount_point.as_str(), mnt))
        .collect();

    for path in ETCD_MOUNT_CANDIDATES {
        if let Some(mnt) = mount_for_path.get(path) {
            return Ok(*mnt);
        }
    }

    let mut paths: Vec<&str> = mount_for_path.keys().copied().collect();
    paths.sort_unstable();
    let mounted = if paths.is_empty() {
        "none".to_string()
    } else {
        paths.join(", ")
    };
    Err(Error::MountpointNotFound { mounted })
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
    fn test_resolves_highest_priority_path() {
        let mounts = vec![
            mount("/", 100, 50),
            mount("/var", 200, 80),
            mount("/var/lib/etcd", 40, 30),
        ];
        let resolved = resolve_etcd_mount(&mounts).unwrap();
        assert_eq!(resolved.mount_point, "/var/lib/etcd");
    }

    #[test]
    fn test_priority_is_independent_of_input_order() {
        let mounts = vec![
            mount("/var/lib", 10, 5),
            mount("/var/lib/etcd", 40, 30),
            mount("/", 100, 50),
        ];
        let resolved = resolve_etcd_mount(&mounts).unwrap();
        assert_eq!(resolved.mount_point, "/var/lib/etcd");

        // Not picked by size: the tiny /var/lib beats the big /.
        let mounts = vec![mount("/", 100_000, 50_000), mount("/var/lib", 10, 5)];
        let resolved = resolve_etcd_mount(&mounts).unwrap();
        assert_eq!(resolved.mount_point, "/var/lib");
    }

    #[test]
    fn test_root_fallback() {
        let mounts = vec![mount("/boot", 1, 1), mount("/", 100, 50)];
        let resolved = resolve_etcd_mount(&mounts).unwrap();
        assert_eq!(resolved.mount_point, "/");
    }

    #[test]
    fn test_duplicate_paths_last_wins() {
        let mounts = vec![mount("/var", 100, 10), mount("/var", 200, 20)];
        let resolved = resolve_etcd_mount(&mounts).unwrap();
        assert_eq!(resolved.total_bytes, 200);
    }

    #[test]
    fn test_no_candidate_lists_sorted_paths() {
        let mounts = vec![mount("/proc", 0, 0), mount("/boot", 1, 1)];
        let err = resolve_etcd_mount(&mounts).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to determine a valid etcd mount path. Paths mounted: /boot, /proc."
        );
    }

    #[test]
    fn test_empty_mount_list() {
        let err = resolve_etcd_mount(&[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to determine a valid etcd mount path. Paths mounted: none."
        );
    }
}
