//! Locations manifest and node-role resolution
//!
//! Every AppScale deployment writes a locations file at
//! `~/.appscale/locations-<keyname>.json`: a JSON array of node records, one
//! per machine, each listing the roles the machine carries. This module
//! loads that manifest and resolves node addresses by role.
//!
//! The manifest is read fresh on every call. Resolution is
//! first-match-in-array-order; the toolchain does not enforce role
//! uniqueness, so callers wanting every match use
//! [`LocationsManifest::public_ips_for_role`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CoreError, Result};
use crate::files::FileReader;

/// Role carried by the node fronting public traffic
pub const LOAD_BALANCER_ROLE: &str = "load_balancer";

/// A single node in a deployment
///
/// Produced by deserializing one element of the locations manifest.
/// Records are immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Publicly routable address
    pub public_ip: String,

    /// Address on the deployment's private network
    pub private_ip: String,

    /// Roles this node carries, in the order the controller assigned them
    pub jobs: Vec<String>,

    /// Cloud instance identifier
    pub instance_id: String,

    /// Which cloud this node was started in
    pub cloud: String,

    /// When the node was started (epoch seconds, null while pending)
    #[serde(default, with = "epoch_serde")]
    pub creation_time: Option<DateTime<Utc>>,

    /// When the node was terminated (epoch seconds, null while running)
    #[serde(default, with = "epoch_serde")]
    pub destruction_time: Option<DateTime<Utc>>,
}

impl NodeRecord {
    /// Check whether this node carries the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.jobs.iter().any(|job| job == role)
    }

    /// Check whether this node fronts public traffic
    pub fn is_load_balancer(&self) -> bool {
        self.has_role(LOAD_BALANCER_ROLE)
    }
}

/// Compute the locations file path for a deployment
///
/// Resolves to `~/.appscale/locations-<keyname>.json`.
pub fn locations_path(keyname: &str) -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CoreError::Config {
        message: "Could not determine home directory".to_string(),
    })?;
    Ok(home
        .join(".appscale")
        .join(format!("locations-{keyname}.json")))
}

/// The node records of one deployment, in manifest order
#[derive(Debug, Clone)]
pub struct LocationsManifest {
    keyname: String,
    nodes: Vec<NodeRecord>,
}

impl LocationsManifest {
    /// Load the manifest for a deployment
    ///
    /// Reads `~/.appscale/locations-<keyname>.json` through the given
    /// reader and parses it as a JSON array of node records, preserving
    /// array order. An unreadable file maps to
    /// [`CoreError::ManifestNotFound`]; malformed contents map to
    /// [`CoreError::ManifestParse`].
    pub fn load(reader: &dyn FileReader, keyname: &str) -> Result<Self> {
        let path = locations_path(keyname)?;
        let content = reader
            .read_to_string(&path)
            .map_err(|_| CoreError::ManifestNotFound {
                path: path.display().to_string(),
            })?;

        let nodes: Vec<NodeRecord> = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} node(s) from {}",
            nodes.len(),
            path.display()
        );

        Ok(Self {
            keyname: keyname.to_string(),
            nodes,
        })
    }

    /// The deployment keyname this manifest was loaded for
    pub fn keyname(&self) -> &str {
        &self.keyname
    }

    /// All node records, in manifest order
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    /// The first node carrying the given role, in manifest order
    pub fn first_with_role(&self, role: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|node| node.has_role(role))
    }

    /// Public addresses of every node carrying the given role, in order
    pub fn public_ips_for_role(&self, role: &str) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|node| node.has_role(role))
            .map(|node| node.public_ip.as_str())
            .collect()
    }

    /// Public address of the first node carrying the given role
    pub fn public_ip_for_role(&self, role: &str) -> Result<&str> {
        self.first_with_role(role)
            .map(|node| node.public_ip.as_str())
            .ok_or_else(|| CoreError::RoleNotFound {
                role: role.to_string(),
            })
    }
}

/// Resolve the public address of the deployment's load balancer
///
/// Loads the locations manifest for `keyname` and returns the public
/// address of the first node whose roles include `load_balancer`.
pub fn get_load_balancer_ip(reader: &dyn FileReader, keyname: &str) -> Result<String> {
    let manifest = LocationsManifest::load(reader, keyname)?;
    Ok(manifest.public_ip_for_role(LOAD_BALANCER_ROLE)?.to_string())
}

/// Serde for epoch-second timestamps
///
/// The controller writes lifecycle times as epoch seconds (integer or
/// float) and null before the event has happened.
mod epoch_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_f64(t.timestamp() as f64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<f64>::deserialize(deserializer)? {
            Some(secs) => {
                let nanos = (secs.fract() * 1e9) as u32;
                DateTime::from_timestamp(secs.trunc() as i64, nanos)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {secs}")))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::MockFileReader;

    // Standard two node deployment
    fn two_node_manifest() -> &'static str {
        r#"[
  {
    "public_ip": "public_ip1",
    "private_ip": "private_ip1",
    "jobs": ["load_balancer", "shadow", "db_master", "zookeeper", "login", "memcache", "rabbitmq_master"],
    "instance_id": "instance_id1",
    "cloud": "cloud1",
    "creation_time": null,
    "destruction_time": null
  },
  {
    "public_ip": "public_ip2",
    "private_ip": "private_ip2",
    "jobs": ["load_balancer", "db_slave", "memcache", "rabbitmq_slave", "appengine"],
    "instance_id": "instance_id2",
    "cloud": "cloud2",
    "creation_time": null,
    "destruction_time": null
  }
]"#
    }

    fn reader_with_manifest(keyname: &str, content: &str) -> MockFileReader {
        MockFileReader::new().with_file(locations_path(keyname).unwrap(), content)
    }

    #[test]
    fn test_get_load_balancer_ip() {
        let reader = reader_with_manifest("appscale", two_node_manifest());

        let ip = get_load_balancer_ip(&reader, "appscale").unwrap();
        assert_eq!(ip, "public_ip1");
    }

    #[test]
    fn test_first_with_role_honors_manifest_order() {
        let reader = reader_with_manifest("appscale", two_node_manifest());
        let manifest = LocationsManifest::load(&reader, "appscale").unwrap();

        // Both nodes carry memcache; the first one wins
        let node = manifest.first_with_role("memcache").unwrap();
        assert_eq!(node.public_ip, "public_ip1");

        // appengine only runs on the second node
        let node = manifest.first_with_role("appengine").unwrap();
        assert_eq!(node.public_ip, "public_ip2");
    }

    #[test]
    fn test_public_ips_for_role_returns_all_matches() {
        let reader = reader_with_manifest("appscale", two_node_manifest());
        let manifest = LocationsManifest::load(&reader, "appscale").unwrap();

        let ips = manifest.public_ips_for_role(LOAD_BALANCER_ROLE);
        assert_eq!(ips, vec!["public_ip1", "public_ip2"]);

        assert!(manifest.public_ips_for_role("taskqueue").is_empty());
    }

    #[test]
    fn test_role_not_found() {
        let reader = reader_with_manifest("appscale", two_node_manifest());
        let manifest = LocationsManifest::load(&reader, "appscale").unwrap();

        let err = manifest.public_ip_for_role("taskqueue").unwrap_err();
        assert!(matches!(err, CoreError::RoleNotFound { role } if role == "taskqueue"));
    }

    #[test]
    fn test_missing_manifest() {
        let reader = MockFileReader::new();

        let err = get_load_balancer_ip(&reader, "appscale").unwrap_err();
        assert!(matches!(err, CoreError::ManifestNotFound { path }
            if path.contains("locations-appscale.json")));
    }

    #[test]
    fn test_malformed_manifest() {
        let reader = reader_with_manifest("appscale", "not json at all");

        let err = get_load_balancer_ip(&reader, "appscale").unwrap_err();
        assert!(matches!(err, CoreError::ManifestParse(_)));
    }

    #[test]
    fn test_wrong_shape_manifest() {
        // Valid JSON, but an object instead of a node array
        let reader = reader_with_manifest("appscale", r#"{"public_ip": "public_ip1"}"#);

        let err = LocationsManifest::load(&reader, "appscale").unwrap_err();
        assert!(matches!(err, CoreError::ManifestParse(_)));
    }

    #[test]
    fn test_node_record_timestamps() {
        let json = r#"{
            "public_ip": "public_ip1",
            "private_ip": "private_ip1",
            "jobs": ["shadow"],
            "instance_id": "i-0123",
            "cloud": "cloud1",
            "creation_time": 1330000000.5,
            "destruction_time": null
        }"#;

        let node: NodeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(node.creation_time.unwrap().timestamp(), 1330000000);
        assert!(node.destruction_time.is_none());
        assert!(node.has_role("shadow"));
        assert!(!node.is_load_balancer());
    }

    #[test]
    fn test_locations_path_shape() {
        let path = locations_path("bootstrap").unwrap();
        let display = path.display().to_string();
        assert!(display.ends_with(".appscale/locations-bootstrap.json"));
    }
}
