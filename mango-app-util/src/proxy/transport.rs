use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

mod grpc;
mod http;
mod kcp;
mod quic;
mod tcp;
mod ws;

pub use grpc::{GrpcMode, GrpcSettings};
pub use http::HttpSettings;
pub use kcp::KcpSettings;
pub use quic::{QuicSecurity, QuicSettings};
pub use tcp::TcpSettings;
pub use ws::WsSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TransportType {
    Tcp,
    Kcp,
    Ws,
    Http,
    Quic,
    Grpc,
}

impl TransportType {
    /// Key of the payload object inside `streamSettings`.
    pub fn settings_key(self) -> &'static str {
        match self {
            TransportType::Tcp => "tcpSettings",
            TransportType::Kcp => "kcpSettings",
            TransportType::Ws => "wsSettings",
            TransportType::Http => "httpSettings",
            TransportType::Quic => "quicSettings",
            TransportType::Grpc => "grpcSettings",
        }
    }
}

/// Packet header disguise shared by the KCP and QUIC transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HeaderType {
    None,
    Srtp,
    Utp,
    #[serde(rename = "wechat-video")]
    #[strum(serialize = "wechat-video")]
    WechatVideo,
    Dtls,
    Wireguard,
}

impl Default for HeaderType {
    fn default() -> Self {
        HeaderType::None
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "type")]
    pub header_type: HeaderType,
}

impl From<HeaderType> for Header {
    fn from(header_type: HeaderType) -> Self {
        Self { header_type }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTransport {
    Tcp(TcpSettings),
    Kcp(KcpSettings),
    Ws(WsSettings),
    Http(HttpSettings),
    Quic(QuicSettings),
    Grpc(GrpcSettings),
}

impl StreamTransport {
    pub fn transport_type(&self) -> TransportType {
        match self {
            StreamTransport::Tcp(_) => TransportType::Tcp,
            StreamTransport::Kcp(_) => TransportType::Kcp,
            StreamTransport::Ws(_) => TransportType::Ws,
            StreamTransport::Http(_) => TransportType::Http,
            StreamTransport::Quic(_) => TransportType::Quic,
            StreamTransport::Grpc(_) => TransportType::Grpc,
        }
    }

    pub fn settings(&self) -> Value {
        match self {
            StreamTransport::Tcp(tcp) => json!(tcp),
            StreamTransport::Kcp(kcp) => json!(kcp),
            StreamTransport::Ws(ws) => json!(ws),
            StreamTransport::Http(http) => json!(http),
            StreamTransport::Quic(quic) => json!(quic),
            StreamTransport::Grpc(grpc) => json!(grpc),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_header_type_tags() {
        let tags: Vec<_> = HeaderType::iter().map(|h| h.to_string()).collect();
        assert_eq!(
            tags,
            ["none", "srtp", "utp", "wechat-video", "dtls", "wireguard"]
        );
        let header: Header = serde_json::from_value(json!({ "type": "wechat-video" })).unwrap();
        assert_eq!(header.header_type, HeaderType::WechatVideo);
        assert!(serde_json::from_value::<Header>(json!({ "type": "http" })).is_err());
    }
}
