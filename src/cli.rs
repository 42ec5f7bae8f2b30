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

use std::path::PathBuf;

use clap::Parser;

use crate::config::{CheckConfig, CheckDefaults};
use crate::error::{Error, Result};
use crate::measure::ETCDKEYSIZE_BIN;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ansible-style JSON variables file providing the mount list and etcd
    /// configuration. When given, host/TLS flags below are ignored and the
    /// mount list is taken from the file instead of the local system.
    #[arg(long)]
    pub vars_file: Option<PathBuf>,

    /// etcd hosts to check, in order.
    #[arg(long, num_args = 1..)]
    pub hosts: Option<Vec<String>>,

    /// etcd client port.
    #[arg(long, default_value_t = CheckDefaults::ETCD_PORT)]
    pub port: u16,

    /// Talk to etcd over https instead of http.
    #[arg(long)]
    pub ssl: bool,

    /// Base path of the platform configuration, used to derive default TLS
    /// material paths.
    #[arg(long)]
    pub config_base: Option<String>,

    /// Explicit image data size limit in bytes. Defaults to half of the
    /// used space on the etcd mount.
    #[arg(long)]
    pub size_limit_bytes: Option<u64>,

    /// Client certificate path override.
    #[arg(long)]
    pub cert: Option<String>,

    /// Client key path override.
    #[arg(long)]
    pub key: Option<String>,

    /// CA certificate path override.
    #[arg(long)]
    pub ca_cert: Option<String>,

    /// Check every host and report all failures instead of stopping at the
    /// first failing host.
    #[arg(long)]
    pub all_hosts: bool,

    /// Path to the etcdkeysize helper binary.
    #[arg(long, default_value = ETCDKEYSIZE_BIN)]
    pub etcdkeysize_bin: String,
}

impl Cli {
    /// Assemble a check configuration from command-line flags.
    ///
    /// Only used when no variables file is given; `--hosts` and
    /// `--config-base` are required in that mode.
    pub fn to_config(&self) -> Result<CheckConfig> {
        let hosts = self.hosts.clone().ok_or_else(|| Error::ConfigLookup {
            key: "hosts".to_string(),
        })?;
        let config_base = self.config_base.clone().ok_or_else(|| Error::ConfigLookup {
            key: "config_base".to_string(),
        })?;

        Ok(CheckConfig {
            size_limit_bytes: self.size_limit_bytes,
            use_ssl: self.ssl,
            port: self.port,
            hosts,
            config_base,
            client_cert: self.cert.clone(),
            client_key: self.key.clone(),
            client_ca_cert: self.ca_cert.clone(),
            report_all_failures: self.all_hosts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_mode_config() {
        let cli = Cli::parse_from([
            "etcd-imagecheck",
            "--hosts",
            "etcd-0",
            "etcd-1",
            "--config-base",
            "/etc/origin",
            "--ssl",
        ]);
        let config = cli.to_config().unwrap();
        assert_eq!(config.hosts, vec!["etcd-0", "etcd-1"]);
        assert_eq!(config.port, CheckDefaults::ETCD_PORT);
        assert!(config.use_ssl);
        assert!(!config.report_all_failures);
    }

    #[test]
    fn test_flag_mode_requires_hosts() {
        let cli = Cli::parse_from(["etcd-imagecheck", "--config-base", "/etc/origin"]);
        let err = cli.to_config().unwrap_err();
        assert!(err.to_string().contains("hosts"));
    }
}
