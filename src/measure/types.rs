use serde::{Deserialize, Serialize};

use crate::config::{CheckConfig, CheckDefaults};

/// Client certificate and key paths, serialized as the nested `cert` object
/// the `etcdkeysize` helper expects.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientCertPair {
    pub cert: String,
    pub key: String,
}

/// Parameters for one size measurement against a single etcd host.
///
/// Constructed fresh per host and never mutated; the byte limit is computed
/// once per run and shared across every request.
#[derive(Serialize, Debug, Clone)]
pub struct MeasurementRequest {
    pub size_limit_bytes: u64,
    pub paths: Vec<String>,
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub version_prefix: String,
    pub allow_redirect: bool,
    pub ca_cert: String,
    pub cert: ClientCertPair,
}

impl MeasurementRequest {
    pub fn new(size_limit_bytes: u64, host: &str, config: &CheckConfig) -> Self {
        Self {
            size_limit_bytes,
            paths: CheckDefaults::IMAGE_DATA_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            host: host.to_string(),
            port: config.port,
            protocol: if config.use_ssl { "https" } else { "http" }.to_string(),
            version_prefix: CheckDefaults::VERSION_PREFIX.to_string(),
            allow_redirect: true,
            ca_cert: config.ca_cert_path(),
            cert: ClientCertPair {
                cert: config.cert_path(),
                key: config.key_path(),
            },
        }
    }
}

/// Outcome of one size measurement, as reported by the helper.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MeasurementResult {
    #[serde(default)]
    pub rc: i32,
    #[serde(default)]
    pub failed: bool,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub module_stderr: Option<String>,
    #[serde(default)]
    pub size_limit_exceeded: bool,
}

impl MeasurementResult {
    /// Whether the measurement itself failed (as opposed to measuring an
    /// over-limit host successfully).
    pub fn is_failure(&self) -> bool {
        self.rc != 0 || self.failed
    }

    /// The diagnostic to surface for a failed measurement. A captured
    /// stderr stream wins over the generic message field.
    pub fn reason(&self) -> &str {
        match (&self.module_stderr, &self.msg) {
            (Some(stderr), _) if !stderr.is_empty() => stderr,
            (_, Some(msg)) => msg,
            _ => "unknown error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CheckConfig {
        CheckConfig {
            size_limit_bytes: None,
            use_ssl: true,
            port: 2379,
            hosts: vec!["etcd-0".to_string()],
            config_base: "/etc/origin".to_string(),
            client_cert: None,
            client_key: None,
            client_ca_cert: None,
            report_all_failures: false,
        }
    }

    #[test]
    fn test_request_shape() {
        let request = MeasurementRequest::new(30, "etcd-0", &config());
        assert_eq!(request.size_limit_bytes, 30);
        assert_eq!(
            request.paths,
            vec!["/openshift.io/images", "/openshift.io/imagestreams"]
        );
        assert_eq!(request.protocol, "https");
        assert_eq!(request.version_prefix, "/v2");
        assert!(request.allow_redirect);
        assert_eq!(request.cert.cert, "/etc/origin/master/master.etcd-client.crt");
    }

    #[test]
    fn test_request_protocol_without_ssl() {
        let mut config = config();
        config.use_ssl = false;
        let request = MeasurementRequest::new(30, "etcd-0", &config);
        assert_eq!(request.protocol, "http");
    }

    #[test]
    fn test_request_serializes_nested_cert() {
        let request = MeasurementRequest::new(30, "etcd-0", &config());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["cert"]["key"], "/etc/origin/master/master.etcd-client.key");
        assert_eq!(value["allow_redirect"], true);
    }

    #[test]
    fn test_result_reason_prefers_stderr() {
        let result = MeasurementResult {
            rc: 1,
            msg: Some("generic failure".to_string()),
            module_stderr: Some("connection refused".to_string()),
            ..Default::default()
        };
        assert!(result.is_failure());
        assert_eq!(result.reason(), "connection refused");
    }

    #[test]
    fn test_result_reason_falls_back_to_msg() {
        let result = MeasurementResult {
            failed: true,
            msg: Some("generic failure".to_string()),
            module_stderr: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(result.reason(), "generic failure");
    }

    #[test]
    fn test_result_deserialize_defaults() {
        let result: MeasurementResult =
            serde_json::from_str(r#"{"size_limit_exceeded": true}"#).unwrap();
        assert_eq!(result.rc, 0);
        assert!(!result.failed);
        assert!(result.size_limit_exceeded);
        assert!(!result.is_failure());
    }
}
