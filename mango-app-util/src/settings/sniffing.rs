use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::compose::SniffingSource;

/// Protocols the engine may sniff the real destination from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SniffProtocol {
    Http,
    Tls,
    Quic,
    Fakedns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct SniffingSettings {
    pub enabled: bool,
    pub dest_override: Vec<SniffProtocol>,
    pub metadata_only: bool,
    pub domains_excluded: Vec<String>,
    /// Sniffed domains are used for routing only; the proxied destination stays the IP.
    pub route_only: bool,
}

impl Default for SniffingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            dest_override: vec![SniffProtocol::Http, SniffProtocol::Tls],
            metadata_only: false,
            domains_excluded: vec![],
            route_only: false,
        }
    }
}

impl SniffingSource for SniffingSettings {
    fn sniffing_snapshot(&self) -> Value {
        json!(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        assert_eq!(
            SniffingSettings::default().sniffing_snapshot(),
            json!({
                "enabled": true,
                "destOverride": ["http", "tls"],
                "metadataOnly": false,
                "domainsExcluded": [],
                "routeOnly": false,
            })
        );
    }

    #[test]
    fn test_snapshot_excluded_domains() {
        let sniffing = SniffingSettings {
            dest_override: vec![SniffProtocol::Fakedns],
            domains_excluded: vec!["courier.push.apple.com".into()],
            route_only: true,
            ..Default::default()
        };
        let snapshot = sniffing.sniffing_snapshot();
        assert_eq!(snapshot["destOverride"], json!(["fakedns"]));
        assert_eq!(snapshot["domainsExcluded"], json!(["courier.push.apple.com"]));
        assert_eq!(snapshot["routeOnly"], true);
    }
}
