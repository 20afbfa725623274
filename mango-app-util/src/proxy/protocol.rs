use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

mod shadowsocks;
mod trojan;
mod vless;
mod vmess;

pub use shadowsocks::{ShadowsocksMethod, ShadowsocksServer};
pub use trojan::TrojanServer;
pub use vless::{Flow, VlessEncryption, VlessServer, VlessUser};
pub use vmess::{VmessSecurity, VmessServer, VmessUser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProtocolType {
    Vless,
    Vmess,
    Trojan,
    Shadowsocks,
}

impl ProtocolType {
    /// Maps a share link scheme onto a protocol kind.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "ss" => Some(ProtocolType::Shadowsocks),
            scheme => scheme.parse().ok(),
        }
    }

    /// Whether links of this kind can be decoded. Trojan and Shadowsocks exist only as
    /// stored records.
    pub fn supports_share_link(self) -> bool {
        matches!(self, ProtocolType::Vless | ProtocolType::Vmess)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyProtocol {
    Vless(VlessServer),
    Vmess(VmessServer),
    Trojan(TrojanServer),
    Shadowsocks(ShadowsocksServer),
}

impl ProxyProtocol {
    pub fn protocol_type(&self) -> ProtocolType {
        match self {
            ProxyProtocol::Vless(_) => ProtocolType::Vless,
            ProxyProtocol::Vmess(_) => ProtocolType::Vmess,
            ProxyProtocol::Trojan(_) => ProtocolType::Trojan,
            ProxyProtocol::Shadowsocks(_) => ProtocolType::Shadowsocks,
        }
    }

    /// The `settings` object of the proxy outbound.
    pub fn outbound_settings(&self) -> Value {
        match self {
            ProxyProtocol::Vless(vless) => json!({ "vnext": [vless] }),
            ProxyProtocol::Vmess(vmess) => json!({ "vnext": [vmess] }),
            ProxyProtocol::Trojan(trojan) => json!({ "servers": [trojan] }),
            ProxyProtocol::Shadowsocks(ss) => json!({ "servers": [ss] }),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_from_scheme() {
        let cases = [
            ("vless", Some(ProtocolType::Vless)),
            ("vmess", Some(ProtocolType::Vmess)),
            ("trojan", Some(ProtocolType::Trojan)),
            ("ss", Some(ProtocolType::Shadowsocks)),
            ("shadowsocks", Some(ProtocolType::Shadowsocks)),
            ("http", None),
        ];
        for (scheme, expected) in cases {
            assert_eq!(ProtocolType::from_scheme(scheme), expected, "{scheme}");
        }
    }

    #[test]
    fn test_supports_share_link() {
        let supported: Vec<_> = ProtocolType::iter()
            .filter(|p| p.supports_share_link())
            .collect();
        assert_eq!(supported, [ProtocolType::Vless, ProtocolType::Vmess]);
    }

    #[test]
    fn test_outbound_settings() {
        let trojan = ProxyProtocol::Trojan(TrojanServer {
            address: "a.co".into(),
            port: 443,
            password: "pw".into(),
        });
        assert_eq!(
            trojan.outbound_settings(),
            json!({ "servers": [{ "address": "a.co", "port": 443, "password": "pw" }] })
        );
    }
}
