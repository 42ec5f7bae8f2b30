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

//! Unified error types for the etcd-imagecheck library.
//!
//! Only two conditions are fatal for a check run: a required configuration
//! key is absent, or no usable etcd mount point could be found. Everything
//! that goes wrong while talking to an etcd host is reported through the
//! normal failed-report path instead, so callers see one boolean verdict.

use thiserror::Error;

/// The main error type for etcd-imagecheck operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration key (or nested key path) is absent.
    ///
    /// The key is reported in dotted form, e.g.
    /// `openshift.master.etcd_hosts`.
    #[error("Required configuration key is missing: {key}")]
    ConfigLookup { key: String },

    /// None of the candidate etcd mount paths is present on the host.
    ///
    /// `mounted` lists every mount path that was actually reported, sorted
    /// alphabetically and comma-separated, or `none` when the host reported
    /// no mounts at all.
    #[error("Unable to determine a valid etcd mount path. Paths mounted: {mounted}.")]
    MountpointNotFound { mounted: String },

    /// An I/O error occurred while reading a variables file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A JSON document (variables file or helper output) failed to parse.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for etcd-imagecheck operations.
pub type Result<T> = std::result::Result<T, Error>;
