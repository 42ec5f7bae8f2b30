//! Typed check configuration.
//!
//! Replaces ad-hoc dotted-key lookups with a configuration struct assembled
//! once at the boundary: required keys are validated eagerly, optional keys
//! are defaulted at construction, and the check logic only ever sees this
//! struct.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::mount::MountInfo;

/// Check configuration constants.
pub struct CheckDefaults;

impl CheckDefaults {
    // etcd connection
    pub const ETCD_PORT: u16 = 2379;
    pub const VERSION_PREFIX: &'static str = "/v2";

    // Key prefixes holding OpenShift image metadata
    pub const IMAGE_DATA_PREFIXES: [&'static str; 2] =
        ["/openshift.io/images", "/openshift.io/imagestreams"];

    // Without an explicit limit, image data may consume at most this share
    // of the space already used on the etcd mount.
    pub const USED_SPACE_LIMIT_RATIO: f64 = 0.5;

    // TLS material under {config_base}
    pub const CLIENT_CERT: &'static str = "master/master.etcd-client.crt";
    pub const CLIENT_KEY: &'static str = "master/master.etcd-client.key";
    pub const CLIENT_CA_CERT: &'static str = "master/master.etcd-ca.crt";
}

/// Configuration for one check run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Explicit byte limit; when absent the limit is derived from the used
    /// space on the resolved etcd mount.
    pub size_limit_bytes: Option<u64>,
    pub use_ssl: bool,
    pub port: u16,
    /// etcd hosts to measure, in the order they will be checked.
    pub hosts: Vec<String>,
    /// Base path of the platform configuration, used to derive default TLS
    /// material paths.
    pub config_base: String,
    pub client_cert: Option<String>,
    pub client_key: Option<String>,
    pub client_ca_cert: Option<String>,
    /// When set, every host is checked and all failures are reported
    /// instead of stopping at the first.
    pub report_all_failures: bool,
}

impl CheckConfig {
    pub fn cert_path(&self) -> String {
        self.client_cert
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.config_base, CheckDefaults::CLIENT_CERT))
    }

    pub fn key_path(&self) -> String {
        self.client_key
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.config_base, CheckDefaults::CLIENT_KEY))
    }

    pub fn ca_cert_path(&self) -> String {
        self.client_ca_cert
            .clone()
            .unwrap_or_else(|| format!("{}/{}", self.config_base, CheckDefaults::CLIENT_CA_CERT))
    }

    /// Assemble a configuration and mount list from an ansible-style
    /// variables document.
    ///
    /// Required keys: `ansible_mounts`, `openshift.master.etcd_hosts`,
    /// `openshift.common.config_base`. A missing required key fails with
    /// [`Error::ConfigLookup`] carrying the dotted key path.
    pub fn from_vars(vars: &Value) -> Result<(CheckConfig, Vec<MountInfo>)> {
        let mounts_raw = required(vars, &["ansible_mounts"])?;
        let mounts: Vec<MountInfo> = serde_json::from_value(mounts_raw.clone())?;

        let hosts_raw = required(vars, &["openshift", "master", "etcd_hosts"])?;
        let hosts: Vec<String> = serde_json::from_value(hosts_raw.clone())?;

        let config_base = required(vars, &["openshift", "common", "config_base"])?
            .as_str()
            .ok_or_else(|| Error::ConfigLookup {
                key: "openshift.common.config_base".to_string(),
            })?
            .to_string();

        let config = CheckConfig {
            size_limit_bytes: vars
                .get("etcd_max_image_data_size_bytes")
                .and_then(Value::as_u64),
            use_ssl: lookup(vars, &["openshift", "master", "etcd_use_ssl"])
                .and_then(Value::as_bool)
                .unwrap_or(false),
            port: lookup(vars, &["openshift", "master", "etcd_port"])
                .and_then(Value::as_u64)
                .map_or(CheckDefaults::ETCD_PORT, |p| p as u16),
            hosts,
            config_base,
            client_cert: string_var(vars, "etcd_client_cert"),
            client_key: string_var(vars, "etcd_client_key"),
            client_ca_cert: string_var(vars, "etcd_client_ca_cert"),
            report_all_failures: false,
        };

        Ok((config, mounts))
    }
}

fn lookup<'a>(vars: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = vars;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

fn required<'a>(vars: &'a Value, path: &[&str]) -> Result<&'a Value> {
    lookup(vars, path).ok_or_else(|| Error::ConfigLookup {
        key: path.join("."),
    })
}

fn string_var(vars: &Value, key: &str) -> Option<String> {
    vars.get(key).and_then(Value::as_str).map(str::to_string)
}
