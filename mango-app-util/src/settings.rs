use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::compose::{RouteSource, SniffingSource};

mod log_level;
mod network;
mod route;
mod sniffing;

pub use log_level::{LogLevel, LogSettings};
pub use network::{NetworkSettings, DEFAULT_INBOUND_PORT};
pub use route::{DomainMatcher, DomainStrategy, OutboundTag, RouteRule, RouteSettings};
pub use sniffing::{SniffProtocol, SniffingSettings};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml_edit::de::Error),
    #[error(r#"invalid value for field "{0}""#)]
    InvalidValue(&'static str),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Runtime inputs of the compiler other than the proxy itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub network: NetworkSettings,
    pub sniffing: SniffingSettings,
    pub route: RouteSettings,
    pub log: LogSettings,
}

impl Settings {
    pub fn from_toml(s: &str) -> SettingsResult<Self> {
        let settings: Settings = toml_edit::de::from_str(s)?;
        settings.network.validate()?;
        Ok(settings)
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl SniffingSource for Settings {
    fn sniffing_snapshot(&self) -> Value {
        self.sniffing.sniffing_snapshot()
    }
}

impl RouteSource for Settings {
    fn build_rules(&self) -> Value {
        self.route.build_rules()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_from_toml_empty() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_toml() {
        let settings = Settings::from_toml(
            r#"
[network]
inbound_port = 10808

[sniffing]
enabled = false
dest_override = ["http", "tls", "quic"]

[route]
domain_strategy = "IPIfNonMatch"

[[route.rules]]
name = "ads"
outbound_tag = "block"
domain = ["geosite:category-ads-all"]

[log]
level = "warn"
"#,
        )
        .unwrap();
        assert_eq!(settings.network.inbound_port, 10808);
        assert!(!settings.sniffing.enabled);
        assert_eq!(
            settings.sniffing.dest_override,
            [SniffProtocol::Http, SniffProtocol::Tls, SniffProtocol::Quic]
        );
        assert_eq!(settings.route.domain_strategy, DomainStrategy::IpIfNonMatch);
        assert_eq!(settings.route.rules.len(), 1);
        assert_eq!(settings.route.rules[0].outbound_tag, OutboundTag::Block);
        assert_eq!(settings.log.level, Some(LogLevel::Warn));
    }

    #[test]
    fn test_from_toml_invalid() {
        let cases = [
            "[network]\ninbound_port = 0",
            "[network]\ninbound_port = 70000",
            "[sniffing]\ndest_override = [\"ftp\"]",
            "[route]\ndomain_matcher = \"mph\"",
            "[unknown]",
            "[network",
        ];
        for input in cases {
            assert!(Settings::from_toml(input).is_err(), "{input}");
        }
        assert!(matches!(
            Settings::from_toml("[network]\ninbound_port = 0"),
            Err(SettingsError::InvalidValue("network.inbound_port"))
        ));
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Settings::load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(missing, Settings::default());

        let path = dir.path().join("settings.toml");
        fs::write(&path, "[network]\ninbound_port = 1080\n").unwrap();
        assert_eq!(Settings::load(&path).unwrap().network.inbound_port, 1080);
    }

    #[test]
    fn test_collaborator_snapshots() {
        let settings = Settings::default();
        assert!(settings.sniffing_snapshot().is_object());
        assert!(settings.build_rules().is_object());
    }
}
