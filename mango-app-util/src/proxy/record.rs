use serde::{Deserialize, Serialize};

use super::protocol::{
    ProtocolType, ProxyProtocol, ShadowsocksServer, TrojanServer, VlessServer, VmessServer,
};
use super::security::{RealitySettings, SecurityType, StreamSecurity, TlsSettings};
use super::transport::{
    GrpcSettings, HttpSettings, KcpSettings, QuicSettings, StreamTransport, TcpSettings,
    TransportType, WsSettings,
};
use super::{Axis, Proxy, VariantBuildFailure};

/// Slot layout of a stored configuration: one discriminator per axis plus one optional
/// payload per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRecord {
    pub protocol_type: ProtocolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vless: Option<VlessServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vmess: Option<VmessServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trojan: Option<TrojanServer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadowsocks: Option<ShadowsocksServer>,
    pub network: TransportType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp: Option<TcpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcp: Option<KcpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws: Option<WsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quic: Option<QuicSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc: Option<GrpcSettings>,
    #[serde(default)]
    pub security: SecurityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality: Option<RealitySettings>,
}

fn require<T>(slot: Option<T>, axis: Axis, discriminator: &'static str) -> Result<T, VariantBuildFailure> {
    slot.ok_or(VariantBuildFailure {
        axis,
        discriminator,
    })
}

impl TryFrom<ProxyRecord> for Proxy {
    type Error = VariantBuildFailure;

    /// Picks the slot each discriminator selects. Slots of other kinds are dropped.
    fn try_from(record: ProxyRecord) -> Result<Self, Self::Error> {
        let protocol_tag: &'static str = record.protocol_type.into();
        let protocol = match record.protocol_type {
            ProtocolType::Vless => {
                ProxyProtocol::Vless(require(record.vless, Axis::Protocol, protocol_tag)?)
            }
            ProtocolType::Vmess => {
                ProxyProtocol::Vmess(require(record.vmess, Axis::Protocol, protocol_tag)?)
            }
            ProtocolType::Trojan => {
                ProxyProtocol::Trojan(require(record.trojan, Axis::Protocol, protocol_tag)?)
            }
            ProtocolType::Shadowsocks => ProxyProtocol::Shadowsocks(require(
                record.shadowsocks,
                Axis::Protocol,
                protocol_tag,
            )?),
        };

        let network_tag: &'static str = record.network.into();
        let transport = match record.network {
            TransportType::Tcp => {
                StreamTransport::Tcp(require(record.tcp, Axis::Transport, network_tag)?)
            }
            TransportType::Kcp => {
                StreamTransport::Kcp(require(record.kcp, Axis::Transport, network_tag)?)
            }
            TransportType::Ws => {
                StreamTransport::Ws(require(record.ws, Axis::Transport, network_tag)?)
            }
            TransportType::Http => {
                StreamTransport::Http(require(record.http, Axis::Transport, network_tag)?)
            }
            TransportType::Quic => {
                StreamTransport::Quic(require(record.quic, Axis::Transport, network_tag)?)
            }
            TransportType::Grpc => {
                StreamTransport::Grpc(require(record.grpc, Axis::Transport, network_tag)?)
            }
        };

        let security_tag: &'static str = record.security.into();
        let security = match record.security {
            SecurityType::None => None,
            SecurityType::Tls => Some(StreamSecurity::Tls(require(
                record.tls,
                Axis::Security,
                security_tag,
            )?)),
            SecurityType::Reality => Some(StreamSecurity::Reality(require(
                record.reality,
                Axis::Security,
                security_tag,
            )?)),
        };

        Ok(Proxy {
            protocol,
            transport,
            security,
        })
    }
}

impl From<Proxy> for ProxyRecord {
    fn from(proxy: Proxy) -> Self {
        let mut record = ProxyRecord {
            protocol_type: proxy.protocol_type(),
            vless: None,
            vmess: None,
            trojan: None,
            shadowsocks: None,
            network: proxy.transport_type(),
            tcp: None,
            kcp: None,
            ws: None,
            http: None,
            quic: None,
            grpc: None,
            security: proxy.security_type(),
            tls: None,
            reality: None,
        };
        match proxy.protocol {
            ProxyProtocol::Vless(p) => record.vless = Some(p),
            ProxyProtocol::Vmess(p) => record.vmess = Some(p),
            ProxyProtocol::Trojan(p) => record.trojan = Some(p),
            ProxyProtocol::Shadowsocks(p) => record.shadowsocks = Some(p),
        }
        match proxy.transport {
            StreamTransport::Tcp(t) => record.tcp = Some(t),
            StreamTransport::Kcp(t) => record.kcp = Some(t),
            StreamTransport::Ws(t) => record.ws = Some(t),
            StreamTransport::Http(t) => record.http = Some(t),
            StreamTransport::Quic(t) => record.quic = Some(t),
            StreamTransport::Grpc(t) => record.grpc = Some(t),
        }
        match proxy.security {
            Some(StreamSecurity::Tls(s)) => record.tls = Some(s),
            Some(StreamSecurity::Reality(s)) => record.reality = Some(s),
            None => {}
        }
        record
    }
}
