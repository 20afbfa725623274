use super::components::LinkComponents;
use super::decode::{DecodeError, DecodeResult, Field, FromLinkComponents};
use crate::proxy::transport::{
    GrpcMode, GrpcSettings, HeaderType, HttpSettings, KcpSettings, QuicSecurity, QuicSettings,
    TcpSettings, TransportType, WsSettings,
};

fn applies(components: &LinkComponents, network: TransportType) -> bool {
    components.network == network
}

impl FromLinkComponents for TcpSettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if !applies(components, TransportType::Tcp) {
            return Ok(None);
        }
        Ok(Some(TcpSettings::default()))
    }
}

impl FromLinkComponents for KcpSettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if !applies(components, TransportType::Kcp) {
            return Ok(None);
        }
        let header_type = components.enum_field(Field::new("kcp", "headerType"), HeaderType::None)?;
        let seed = components.string_field(Field::new("kcp", "seed"), String::new)?;
        Ok(Some(KcpSettings {
            header: header_type.into(),
            seed,
            ..Default::default()
        }))
    }
}

impl FromLinkComponents for WsSettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if !applies(components, TransportType::Ws) {
            return Ok(None);
        }
        let host = components.string_field(Field::new("ws", "host"), || components.host.clone())?;
        let path = components.string_field(Field::new("ws", "path"), || "/".into())?;
        Ok(Some(WsSettings::with_host(host, path)))
    }
}

impl FromLinkComponents for HttpSettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if !applies(components, TransportType::Http) {
            return Ok(None);
        }
        let host = components.string_field(Field::new("http", "host"), || components.host.clone())?;
        let path = components.string_field(Field::new("http", "path"), || "/".into())?;
        Ok(Some(HttpSettings {
            host: vec![host],
            path,
        }))
    }
}

impl FromLinkComponents for QuicSettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if !applies(components, TransportType::Quic) {
            return Ok(None);
        }
        let security_field = Field::new("quic", "quicSecurity");
        let key_field = Field::new("quic", "key");
        let security = components.enum_field(security_field, QuicSecurity::None)?;
        let key = components.string_field(key_field, String::new)?;
        if security == QuicSecurity::None && !key.is_empty() {
            return Err(DecodeError::InvalidCombination {
                field: key_field,
                conflicts_with: security_field,
            });
        }
        let header_type = components.enum_field(Field::new("quic", "headerType"), HeaderType::None)?;
        Ok(Some(QuicSettings {
            security,
            key,
            header: header_type.into(),
        }))
    }
}

impl FromLinkComponents for GrpcSettings {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if !applies(components, TransportType::Grpc) {
            return Ok(None);
        }
        let service_name = components.string_field(Field::new("grpc", "serviceName"), String::new)?;
        let mode = components.enum_field(Field::new("grpc", "mode"), GrpcMode::Gun)?;
        Ok(Some(GrpcSettings {
            service_name,
            multi_mode: mode == GrpcMode::Multi,
        }))
    }
}
