use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

mod reality;
mod tls;

pub use reality::RealitySettings;
pub use tls::TlsSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SecurityType {
    None,
    Tls,
    Reality,
}

impl Default for SecurityType {
    fn default() -> Self {
        SecurityType::None
    }
}

impl SecurityType {
    /// Key of the payload object inside `streamSettings`, absent for `none`.
    pub fn settings_key(self) -> Option<&'static str> {
        match self {
            SecurityType::None => None,
            SecurityType::Tls => Some("tlsSettings"),
            SecurityType::Reality => Some("realitySettings"),
        }
    }
}

/// TLS client hello fingerprint imitated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Fingerprint {
    Chrome,
    Firefox,
    Safari,
    Ios,
    Android,
    Edge,
    #[serde(rename = "360")]
    #[strum(serialize = "360")]
    Qihoo360,
    Qq,
    Random,
    Randomized,
}

impl Default for Fingerprint {
    fn default() -> Self {
        Fingerprint::Chrome
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Alpn {
    H2,
    #[serde(rename = "http/1.1")]
    #[strum(serialize = "http/1.1")]
    Http11,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSecurity {
    Tls(TlsSettings),
    Reality(RealitySettings),
}

impl StreamSecurity {
    pub fn security_type(&self) -> SecurityType {
        match self {
            StreamSecurity::Tls(_) => SecurityType::Tls,
            StreamSecurity::Reality(_) => SecurityType::Reality,
        }
    }

    pub fn settings(&self) -> Value {
        match self {
            StreamSecurity::Tls(tls) => json!(tls),
            StreamSecurity::Reality(reality) => json!(reality),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_tags_agree_between_strum_and_serde() {
        for fp in Fingerprint::iter() {
            let tag = fp.to_string();
            assert_eq!(json!(fp), json!(tag), "{tag}");
            assert_eq!(tag.parse::<Fingerprint>().unwrap(), fp, "{tag}");
        }
        for alpn in Alpn::iter() {
            let tag: &'static str = alpn.into();
            assert_eq!(json!(alpn), json!(tag), "{tag}");
        }
        assert_eq!(Fingerprint::Qihoo360.to_string(), "360");
        assert_eq!(Alpn::Http11.to_string(), "http/1.1");
        assert!("Chrome".parse::<Fingerprint>().is_err());
    }
}
