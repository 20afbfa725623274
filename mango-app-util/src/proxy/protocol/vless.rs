use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// VLESS carries no encryption of its own; the engine only accepts `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VlessEncryption {
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
pub enum Flow {
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    None,
    #[serde(rename = "xtls-rprx-vision")]
    #[strum(serialize = "xtls-rprx-vision")]
    XtlsRprxVision,
    #[serde(rename = "xtls-rprx-vision-udp443")]
    #[strum(serialize = "xtls-rprx-vision-udp443")]
    XtlsRprxVisionUdp443,
}

impl Flow {
    pub fn is_none(&self) -> bool {
        *self == Flow::None
    }
}

impl Default for Flow {
    fn default() -> Self {
        Flow::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlessServer {
    pub address: String,
    pub port: u16,
    pub users: Vec<VlessUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlessUser {
    pub id: String,
    pub encryption: VlessEncryption,
    // The engine treats a missing flow as no flow control.
    #[serde(default, skip_serializing_if = "Flow::is_none")]
    pub flow: Flow,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialize_user_without_flow() {
        let user = VlessUser {
            id: "u".into(),
            encryption: VlessEncryption::None,
            flow: Flow::None,
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "id": "u", "encryption": "none" })
        );
    }

    #[test]
    fn test_deserialize_user_with_flow() {
        let user: VlessUser = serde_json::from_value(json!({
            "id": "u",
            "encryption": "none",
            "flow": "xtls-rprx-vision",
        }))
        .unwrap();
        assert_eq!(user.flow, Flow::XtlsRprxVision);
    }
}
