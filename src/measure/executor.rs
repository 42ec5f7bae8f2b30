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

//! Delegated key-size measurement.
//!
//! The actual walk over etcd's key space lives in the external
//! `etcdkeysize` helper; this module only defines the seam and the process
//! plumbing around it. Transport problems (helper missing, crashing,
//! producing garbage) are folded into a failed [`MeasurementResult`] so the
//! checker handles them through its normal failure path.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::Result;
use crate::measure::types::{MeasurementRequest, MeasurementResult};

/// Capability to measure the aggregate size of key prefixes on one etcd
/// host.
///
/// Injected into the checker; production uses [`EtcdKeySizeCommand`], tests
/// supply a scripted double.
#[async_trait]
pub trait KeySizeExecutor: Send + Sync {
    async fn measure(&self, request: &MeasurementRequest) -> Result<MeasurementResult>;
}

/// Default name of the measurement helper on `$PATH`.
pub const ETCDKEYSIZE_BIN: &str = "etcdkeysize";

/// Production executor that spawns the `etcdkeysize` helper.
///
/// The request is written as JSON on the helper's stdin and the result is
/// read as JSON from its stdout.
pub struct EtcdKeySizeCommand {
    program: String,
}

impl EtcdKeySizeCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for EtcdKeySizeCommand {
    fn default() -> Self {
        Self::new(ETCDKEYSIZE_BIN)
    }
}

#[async_trait]
impl KeySizeExecutor for EtcdKeySizeCommand {
    async fn measure(&self, request: &MeasurementRequest) -> Result<MeasurementResult> {
        let payload = serde_json::to_vec(request)?;
        debug!(host = %request.host, program = %self.program, "invoking etcdkeysize helper");

        let mut child = match Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(err) => return Ok(transport_failure(format!("failed to spawn helper: {err}"))),
        };

        // stdin is piped above, so take() cannot return None here.
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(&payload).await {
                return Ok(transport_failure(format!(
                    "failed to write request to helper: {err}"
                )));
            }
        }

        let output = match child.wait_with_output().await {
            Ok(output) => output,
            Err(err) => return Ok(transport_failure(format!("helper did not finish: {err}"))),
        };

        let rc = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if rc != 0 {
            return Ok(MeasurementResult {
                rc,
                failed: true,
                msg: Some(format!("{} exited with status {rc}", self.program)),
                module_stderr: (!stderr.is_empty()).then_some(stderr),
                size_limit_exceeded: false,
            });
        }

        match serde_json::from_slice::<MeasurementResult>(&output.stdout) {
            Ok(mut result) => {
                if result.module_stderr.is_none() && !stderr.is_empty() {
                    result.module_stderr = Some(stderr);
                }
                Ok(result)
            }
            Err(err) => Ok(MeasurementResult {
                rc,
                failed: true,
                msg: Some(format!("undecodable helper output: {err}")),
                module_stderr: (!stderr.is_empty()).then_some(stderr),
                size_limit_exceeded: false,
            }),
        }
    }
}

fn transport_failure(msg: String) -> MeasurementResult {
    MeasurementResult {
        rc: -1,
        failed: true,
        msg: Some(msg),
        module_stderr: None,
        size_limit_exceeded: false,
    }
}
