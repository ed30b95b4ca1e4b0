use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use genutils_core::serialize;

use crate::app_state::AppState;
use crate::error::StateError;

/// A genesis document. Everything outside `app_state` is carried verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisDoc {
    pub genesis_time: String,
    pub chain_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_height: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus_params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validators: Option<Value>,
    #[serde(default)]
    pub app_hash: String,
    pub app_state: AppState,
}

impl GenesisDoc {
    /// Read and parse a genesis file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StateError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "Read genesis file");

        let doc: GenesisDoc = serialize::from_json_bytes(&bytes)
            .map_err(|e| StateError::Format(format!("{}: {}", path.display(), e)))?;

        info!(
            chain_id = %doc.chain_id,
            modules = doc.app_state.len(),
            "Loaded genesis document"
        );
        Ok(doc)
    }

    /// Write the document as pretty JSON with sorted keys, replacing any
    /// existing file. The JSON goes to a fresh temporary file next to `path`
    /// which is then renamed over it; on failure the temporary file is removed.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), StateError> {
        let path = path.as_ref();
        let json = serialize::to_json_pretty(self)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;

        info!(path = %path.display(), "Wrote genesis document");
        Ok(())
    }
}
