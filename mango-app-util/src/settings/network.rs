use serde::Deserialize;

use super::{SettingsError, SettingsResult};

pub const DEFAULT_INBOUND_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSettings {
    /// Port of the local SOCKS inbound.
    pub inbound_port: u16,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            inbound_port: DEFAULT_INBOUND_PORT,
        }
    }
}

impl NetworkSettings {
    pub(super) fn validate(&self) -> SettingsResult<()> {
        if self.inbound_port == 0 {
            return Err(SettingsError::InvalidValue("network.inbound_port"));
        }
        Ok(())
    }
}
