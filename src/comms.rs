use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tauri::State;

/// HTTP route the file server answers on.
pub const FILE_ROUTE: &str = "file";
/// Query parameter naming the requested file.
pub const FILENAME_QUERY_KEY: &str = "filename";

/// Everything the frontend needs to address the file server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommsInfo {
    pub file_server_port: Option<u16>,
    pub host: String,
    pub route: String,
    pub query_key: String,
}

/// Write-once slot for the file server's bound port, filled in when
/// the startup handshake arrives. Replaces the original design's
/// process-wide environment variables.
pub struct CommsState {
    host: String,
    port: Mutex<Option<u16>>,
}

impl CommsState {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Mutex::new(None),
        }
    }

    pub fn from_env() -> Self {
        let host = std::env::var("FSLGUI_HOST").unwrap_or_else(|_| "localhost".to_string());
        Self::new(host)
    }

    pub fn set_port(&self, port: u16) {
        let mut slot = self.port.lock();
        if let Some(existing) = *slot {
            log::warn!("file server port already set to {existing}, ignoring {port}");
            return;
        }
        *slot = Some(port);
    }

    pub fn info(&self) -> CommsInfo {
        CommsInfo {
            file_server_port: *self.port.lock(),
            host: self.host.clone(),
            route: FILE_ROUTE.to_string(),
            query_key: FILENAME_QUERY_KEY.to_string(),
        }
    }
}

#[tauri::command]
pub fn get_comms_info(comms: State<'_, Arc<CommsState>>) -> CommsInfo {
    comms.info()
}
