use serde::{Deserialize, Serialize};

use super::Fingerprint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealitySettings {
    #[serde(default)]
    pub show: bool,
    #[serde(default)]
    pub fingerprint: Fingerprint,
    pub server_name: String,
    pub public_key: String,
    #[serde(default)]
    pub short_id: String,
    #[serde(default)]
    pub spider_x: String,
}
