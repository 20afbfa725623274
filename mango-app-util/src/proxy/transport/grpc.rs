use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GrpcMode {
    Gun,
    Multi,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcSettings {
    pub service_name: String,
    #[serde(default)]
    pub multi_mode: bool,
}

impl GrpcSettings {
    pub fn mode(&self) -> GrpcMode {
        if self.multi_mode {
            GrpcMode::Multi
        } else {
            GrpcMode::Gun
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_mode() {
        let cases = [(false, GrpcMode::Gun), (true, GrpcMode::Multi)];
        for (multi_mode, expected) in cases {
            let grpc: GrpcSettings =
                serde_json::from_value(json!({ "serviceName": "s", "multiMode": multi_mode }))
                    .unwrap();
            assert_eq!(grpc.mode(), expected, "{multi_mode}");
        }
    }
}
