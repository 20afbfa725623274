use serde_json::{json, Value};
use thiserror::Error;

use crate::proxy::{Proxy, ProxyRecord, VariantBuildFailure};

mod outbound;

pub use outbound::{BLOCK_TAG, DIRECT_TAG, PROXY_TAG};

pub const INBOUND_LISTEN: &str = "[::1]";
pub const INBOUND_TAG: &str = "socks-in";

/// Supplies the `sniffing` object embedded into the inbound.
pub trait SniffingSource {
    fn sniffing_snapshot(&self) -> Value;
}

/// Supplies the `routing` object, with disabled rules already filtered out.
pub trait RouteSource {
    fn build_rules(&self) -> Value;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error(transparent)]
    VariantBuildFailure(#[from] VariantBuildFailure),
    #[error("{0} snapshot is not a JSON object")]
    InvalidSnapshot(&'static str),
}

pub type ComposeResult<T> = Result<T, ComposeError>;

fn expect_object(snapshot: Value, name: &'static str) -> ComposeResult<Value> {
    if snapshot.is_object() {
        Ok(snapshot)
    } else {
        Err(ComposeError::InvalidSnapshot(name))
    }
}

fn compose_inbound(port: u16, sniffing: Value) -> Value {
    json!({
        "listen": INBOUND_LISTEN,
        "protocol": "socks",
        "settings": {
            "udp": true,
            "auth": "noauth",
        },
        "tag": INBOUND_TAG,
        "port": port,
        "sniffing": sniffing,
    })
}

/// Builds the engine configuration document for `proxy`.
///
/// Object keys of the result are kept in sorted order, so equal inputs produce
/// byte-identical serializations.
pub fn compose_document(
    proxy: &Proxy,
    inbound_port: u16,
    sniffing: &impl SniffingSource,
    route: &impl RouteSource,
) -> ComposeResult<Value> {
    let sniffing = expect_object(sniffing.sniffing_snapshot(), "sniffing")?;
    let routing = expect_object(route.build_rules(), "routing")?;
    Ok(json!({
        "inbounds": [compose_inbound(inbound_port, sniffing)],
        "outbounds": outbound::compose_outbounds(proxy),
        "routing": routing,
    }))
}

/// Serializes the document of [`compose_document`] into the bytes handed to the engine.
pub fn compose_engine_config(
    proxy: &Proxy,
    inbound_port: u16,
    sniffing: &impl SniffingSource,
    route: &impl RouteSource,
) -> ComposeResult<Vec<u8>> {
    let doc = compose_document(proxy, inbound_port, sniffing, route)?;
    log::debug!("[CONFIG] {doc}");
    Ok(serde_json::to_vec(&doc).expect("Cannot serialize engine configuration"))
}

/// Like [`compose_engine_config`], but first checks that every slot the record's
/// discriminators select is populated.
pub fn compose_record(
    record: ProxyRecord,
    inbound_port: u16,
    sniffing: &impl SniffingSource,
    route: &impl RouteSource,
) -> ComposeResult<Vec<u8>> {
    let proxy = Proxy::try_from(record)?;
    compose_engine_config(&proxy, inbound_port, sniffing, route)
}
