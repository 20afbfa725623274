use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::Header;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
pub enum QuicSecurity {
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    None,
    #[serde(rename = "aes-128-gcm")]
    #[strum(serialize = "aes-128-gcm")]
    Aes128Gcm,
    #[serde(rename = "chacha20-poly1305")]
    #[strum(serialize = "chacha20-poly1305")]
    Chacha20Poly1305,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuicSettings {
    pub security: QuicSecurity,
    /// Must stay empty while `security` is `none`.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub header: Header,
}
