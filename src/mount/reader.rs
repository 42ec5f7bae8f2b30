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

//! Mount reader trait and implementations.
//!
//! This module provides the [`MountReader`] trait for reading filesystem
//! mount information and a [`LocalMountReader`] implementation using
//! `sysinfo::Disks`. In an automation harness the mount list usually comes
//! from gathered facts instead; the trait keeps that seam open.

use sysinfo::Disks;

use crate::mount::info::MountInfo;

/// Trait for reading filesystem mount information.
///
/// Implementations must be thread-safe (`Send + Sync`) to allow
/// concurrent access from multiple threads.
pub trait MountReader: Send + Sync {
    /// Get information about all mounted filesystems.
    fn mounts(&self) -> Vec<MountInfo>;
}

/// Local mount reader using `sysinfo::Disks`.
///
/// Collects mount information from the system the check is running on.
/// Useful when no facts document is supplied, e.g. when the check is run
/// directly on an etcd host.
pub struct LocalMountReader;

impl LocalMountReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalMountReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MountReader for LocalMountReader {
    fn mounts(&self) -> Vec<MountInfo> {
        let disks = Disks::new_with_refreshed_list();

        let mut mounts: Vec<MountInfo> = disks
            .iter()
            .map(|disk| MountInfo {
                mount_point: disk.mount_point().to_string_lossy().to_string(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect();
        mounts.sort_by(|a, b| a.mount_point.cmp(&b.mount_point));
        mounts
    }
}

/// Create a mount reader for the local system.
///
/// Factory returning a boxed [`MountReader`] trait object, allowing for
/// future implementations of remote or mock readers.
pub fn create_mount_reader() -> Box<dyn MountReader> {
    Box::new(LocalMountReader::new())
}
