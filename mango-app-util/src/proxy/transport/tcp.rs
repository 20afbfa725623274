use serde::{Deserialize, Serialize};

use super::Header;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpSettings {
    #[serde(default)]
    pub header: Header,
}
