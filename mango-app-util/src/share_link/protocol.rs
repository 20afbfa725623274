use super::components::LinkComponents;
use super::decode::{DecodeError, DecodeResult, Field, FromLinkComponents};
use crate::proxy::protocol::{
    Flow, ProtocolType, ShadowsocksServer, TrojanServer, VlessEncryption, VlessServer,
    VlessUser, VmessSecurity, VmessServer, VmessUser,
};

impl FromLinkComponents for VlessServer {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if components.protocol_type != ProtocolType::Vless {
            return Ok(None);
        }
        let encryption = components.field(
            Field::new("vless", "encryption"),
            || VlessEncryption::None,
            |value| {
                value
                    .parse::<VlessEncryption>()
                    .map_err(|_| DecodeError::UnsupportedValue {
                        field: Field::new("vless", "encryption"),
                        value: value.to_owned(),
                    })
            },
        )?;
        let flow = components.enum_field(Field::new("vless", "flow"), Flow::None)?;
        Ok(Some(VlessServer {
            address: components.host.clone(),
            port: components.port,
            users: vec![VlessUser {
                id: components.user.clone(),
                encryption,
                flow,
            }],
        }))
    }
}

impl FromLinkComponents for VmessServer {
    fn from_components(components: &LinkComponents) -> DecodeResult<Option<Self>> {
        if components.protocol_type != ProtocolType::Vmess {
            return Ok(None);
        }
        let security = components.enum_field(Field::new("vmess", "encryption"), VmessSecurity::Auto)?;
        Ok(Some(VmessServer {
            address: components.host.clone(),
            port: components.port,
            users: vec![VmessUser {
                id: components.user.clone(),
                alter_id: 0,
                security,
            }],
        }))
    }
}

// Trojan and Shadowsocks links are refused before any variant parser runs.
impl FromLinkComponents for TrojanServer {
    fn from_components(_: &LinkComponents) -> DecodeResult<Option<Self>> {
        Ok(None)
    }
}

impl FromLinkComponents for ShadowsocksServer {
    fn from_components(_: &LinkComponents) -> DecodeResult<Option<Self>> {
        Ok(None)
    }
}
