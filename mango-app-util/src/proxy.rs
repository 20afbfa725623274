use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod protocol;
mod record;
pub mod security;
pub mod transport;

pub use record::ProxyRecord;

use protocol::{ProtocolType, ProxyProtocol};
use security::{SecurityType, StreamSecurity};
use transport::{StreamTransport, TransportType};

/// One of the three independent classification dimensions of a [`Proxy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Protocol,
    Transport,
    Security,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Protocol => "protocol",
            Axis::Transport => "transport",
            Axis::Security => "security",
        })
    }
}

/// The payload slot selected by a discriminator is empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(r#"{axis} "{discriminator}" build failed: no matching settings"#)]
pub struct VariantBuildFailure {
    pub axis: Axis,
    pub discriminator: &'static str,
}

/// A complete outbound proxy: exactly one payload per axis, each matching its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ProxyRecord", try_from = "ProxyRecord")]
pub struct Proxy {
    pub protocol: ProxyProtocol,
    pub transport: StreamTransport,
    pub security: Option<StreamSecurity>,
}

impl Proxy {
    pub fn protocol_type(&self) -> ProtocolType {
        self.protocol.protocol_type()
    }
    pub fn transport_type(&self) -> TransportType {
        self.transport.transport_type()
    }
    pub fn security_type(&self) -> SecurityType {
        self.security
            .as_ref()
            .map(StreamSecurity::security_type)
            .unwrap_or(SecurityType::None)
    }
}
