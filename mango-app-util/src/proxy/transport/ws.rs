use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsSettings {
    pub path: String,
    /// Always carries a `Host` entry when decoded from a link.
    pub headers: BTreeMap<String, String>,
}

impl WsSettings {
    pub fn with_host(host: String, path: String) -> Self {
        Self {
            path,
            headers: BTreeMap::from([("Host".to_owned(), host)]),
        }
    }
    pub fn host(&self) -> Option<&str> {
        self.headers.get("Host").map(String::as_str)
    }
}
