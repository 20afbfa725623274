use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::compose::ComposeError;
use crate::proxy::{Proxy, ProxyRecord};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("configuration {0} not found")]
    NotFound(Uuid),
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// What a stored `config.json` holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredConfiguration {
    /// A record decoded from a share link, to be compiled.
    Proxy(Proxy),
    /// A complete engine configuration imported as is, passed through unchanged.
    Raw(Vec<u8>),
}

/// Records carry a `protocolType` discriminator; imported engine configurations do not.
fn is_proxy_record(data: &[u8]) -> StoreResult<bool> {
    let value: serde_json::Value = serde_json::from_slice(data)?;
    Ok(value
        .as_object()
        .map_or(true, |doc| doc.contains_key("protocolType")))
}

/// Source of persisted configuration records, one per id.
pub trait ConfigurationStore {
    fn read_configuration(&self, id: &Uuid) -> StoreResult<Vec<u8>>;

    fn load_record(&self, id: &Uuid) -> StoreResult<ProxyRecord> {
        let data = self.read_configuration(id)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn load_proxy(&self, id: &Uuid) -> StoreResult<Proxy> {
        let record = self.load_record(id)?;
        let proxy = Proxy::try_from(record).map_err(ComposeError::from)?;
        log::debug!("loaded configuration {id}");
        Ok(proxy)
    }

    fn load_configuration(&self, id: &Uuid) -> StoreResult<StoredConfiguration> {
        let data = self.read_configuration(id)?;
        if !is_proxy_record(&data)? {
            log::debug!("loaded raw configuration {id} ({} bytes)", data.len());
            return Ok(StoredConfiguration::Raw(data));
        }
        let record: ProxyRecord = serde_json::from_slice(&data)?;
        let proxy = Proxy::try_from(record).map_err(ComposeError::from)?;
        log::debug!("loaded configuration {id}");
        Ok(StoredConfiguration::Proxy(proxy))
    }
}

/// Reads `<root>/<id>/config.json`.
pub struct FsConfigurationStore {
    root: PathBuf,
}

impl FsConfigurationStore {
    pub fn new(root: PathBuf) -> io::Result<Self> {
        Ok(Self {
            root: root.canonicalize()?,
        })
    }
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }
}

impl ConfigurationStore for FsConfigurationStore {
    fn read_configuration(&self, id: &Uuid) -> StoreResult<Vec<u8>> {
        let file_path = self.root.join(id.to_string()).join(CONFIG_FILE_NAME);
        let file_path = match file_path.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound(*id)),
            Err(e) => return Err(e.into()),
        };
        if !file_path.starts_with(&self.root) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "Configuration path is outside of store root",
            )
            .into());
        }
        Ok(fs::read(file_path)?)
    }
}
