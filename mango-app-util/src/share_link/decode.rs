use std::fmt;

use thiserror::Error;

use super::components::LinkComponents;
use crate::proxy::protocol::{ShadowsocksServer, TrojanServer, VlessServer, VmessServer};
use crate::proxy::security::{RealitySettings, TlsSettings};
use crate::proxy::transport::{
    GrpcSettings, HttpSettings, KcpSettings, QuicSettings, TcpSettings, WsSettings,
};
use crate::proxy::{Proxy, ProxyRecord, VariantBuildFailure};

/// A query key qualified by the protocol, transport or security kind reading it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub scope: &'static str,
    pub key: &'static str,
}

impl Field {
    pub const fn new(scope: &'static str, key: &'static str) -> Self {
        Self { scope, key }
    }
    pub(super) const fn link(key: &'static str) -> Self {
        Self::new("link", key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.scope, self.key)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid share link")]
    MalformedLink,
    #[error(r#"protocol "{0}" cannot be decoded from a share link"#)]
    UnsupportedProtocol(String),
    #[error(r#""{0}" is required, but is missing"#)]
    MissingRequiredField(Field),
    #[error(r#""{0}" is present, but empty"#)]
    EmptyField(Field),
    #[error(r#"invalid port "{0}""#)]
    InvalidPort(String),
    #[error(r#"unknown value "{value}" for field "{field}""#)]
    UnknownEnumValue { field: Field, value: String },
    #[error(r#"unsupported value "{value}" for field "{field}""#)]
    UnsupportedValue { field: Field, value: String },
    #[error(r#""{field}" cannot be used together with "{conflicts_with}""#)]
    InvalidCombination { field: Field, conflicts_with: Field },
    #[error(transparent)]
    VariantBuildFailure(#[from] VariantBuildFailure),
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Parses a payload of one kind out of the link components, or returns `None` when the
/// discriminator of its axis names another kind.
pub(super) trait FromLinkComponents: Sized {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>>;
}

pub fn decode_share_link(link: &str) -> DecodeResult<Proxy> {
    let components = LinkComponents::parse(link)?;
    Proxy::from_components(&components)
}

impl Proxy {
    /// Runs every variant parser against `components`: protocols first, then
    /// transports, then securities. The first error wins.
    pub fn from_components(components: &LinkComponents) -> DecodeResult<Self> {
        let record = ProxyRecord {
            protocol_type: components.protocol_type,
            vless: VlessServer::from_components(components)?,
            vmess: VmessServer::from_components(components)?,
            trojan: TrojanServer::from_components(components)?,
            shadowsocks: ShadowsocksServer::from_components(components)?,
            network: components.network,
            tcp: TcpSettings::from_components(components)?,
            kcp: KcpSettings::from_components(components)?,
            ws: WsSettings::from_components(components)?,
            http: HttpSettings::from_components(components)?,
            quic: QuicSettings::from_components(components)?,
            grpc: GrpcSettings::from_components(components)?,
            security: components.security,
            tls: TlsSettings::from_components(components)?,
            reality: RealitySettings::from_components(components)?,
        };
        let proxy = Proxy::try_from(record)?;
        log::debug!(
            "decoded {} proxy over {} with security {}",
            proxy.protocol_type(),
            proxy.transport_type(),
            proxy.security_type()
        );
        Ok(proxy)
    }
}
