use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::{Alpn, Fingerprint};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    pub server_name: String,
    #[serde(default)]
    pub allow_insecure: bool,
    pub alpn: Vec<Alpn>,
    #[serde(default)]
    pub fingerprint: Fingerprint,
}

impl TlsSettings {
    /// Settings for `server_name` with every other field at its default.
    pub fn new(server_name: String) -> Self {
        Self {
            server_name,
            allow_insecure: false,
            alpn: Alpn::iter().collect(),
            fingerprint: Fingerprint::default(),
        }
    }
}
