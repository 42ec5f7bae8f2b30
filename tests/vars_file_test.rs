use std::io::Write;

use etcd_imagecheck::config::CheckConfig;
use etcd_imagecheck::mount::resolve_etcd_mount;

// End-to-end over the boundary: an ansible facts document written to disk,
// parsed, and fed through mount resolution.
#[test]
fn vars_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "ansible_mounts": [
                {{"mount": "/boot", "size_total": 1000, "size_available": 500}},
                {{"mount": "/var", "size_total": 100, "size_available": 40}}
            ],
            "etcd_max_image_data_size_bytes": 40000000000,
            "openshift": {{
                "master": {{
                    "etcd_hosts": ["etcd-0.example.com"],
                    "etcd_use_ssl": true
                }},
                "common": {{"config_base": "/etc/origin"}}
            }}
        }}"#
    )
    .unwrap();

    let raw = std::fs::read_to_string(file.path()).unwrap();
    let vars: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let (config, mounts) = CheckConfig::from_vars(&vars).unwrap();

    assert_eq!(config.hosts, vec!["etcd-0.example.com"]);
    assert!(config.use_ssl);
    assert_eq!(config.size_limit_bytes, Some(40_000_000_000));

    let mount = resolve_etcd_mount(&mounts).unwrap();
    assert_eq!(mount.mount_point, "/var");
    assert_eq!(mount.total_bytes, 100);
}
