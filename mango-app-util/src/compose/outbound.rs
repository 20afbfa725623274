use serde_json::{json, Map, Value};

use crate::proxy::Proxy;

pub const PROXY_TAG: &str = "proxy";
pub const DIRECT_TAG: &str = "direct";
pub const BLOCK_TAG: &str = "block";

fn compose_stream_settings(proxy: &Proxy) -> Value {
    let mut stream = Map::new();
    let network = proxy.transport_type();
    stream.insert("network".into(), json!(network));
    stream.insert(network.settings_key().into(), proxy.transport.settings());
    let security = proxy.security_type();
    stream.insert("security".into(), json!(security));
    if let (Some(payload), Some(key)) = (&proxy.security, security.settings_key()) {
        stream.insert(key.into(), payload.settings());
    }
    Value::Object(stream)
}

fn compose_proxy_outbound(proxy: &Proxy) -> Value {
    json!({
        "tag": PROXY_TAG,
        "protocol": proxy.protocol_type(),
        "settings": proxy.protocol.outbound_settings(),
        "streamSettings": compose_stream_settings(proxy),
    })
}

/// The proxy, direct and block outbounds, in that order.
pub(super) fn compose_outbounds(proxy: &Proxy) -> Value {
    json!([
        compose_proxy_outbound(proxy),
        { "tag": DIRECT_TAG, "protocol": "freedom" },
        { "tag": BLOCK_TAG, "protocol": "blackhole" },
    ])
}
