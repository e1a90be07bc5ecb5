use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use tauri::AppHandle;
use tauri_plugin_shell::process::{CommandChild, CommandEvent};
use tauri_plugin_shell::ShellExt;

use crate::comms::CommsState;

/// The one message the file server sends at startup:
/// `{"type":"fileServerPort","value":<port>}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
enum ServerMessage {
    FileServerPort(u16),
}

/// Handle on the background file-server child, kept in managed state
/// so the exit handler can kill it.
pub struct FileServerHandle {
    child: Mutex<Option<CommandChild>>,
}

/// `FSLGUI_FILESERVER` overrides the program; default is the
/// companion binary on `PATH`.
fn server_program() -> String {
    std::env::var("FSLGUI_FILESERVER").unwrap_or_else(|_| "fslgui-fileserver".to_string())
}

/// Spawns the file server and watches its output on a background
/// thread. The first handshake line fills the comms port slot; all
/// other output is forwarded to the log.
pub fn spawn(app: &AppHandle, comms: Arc<CommsState>) -> Result<FileServerHandle, String> {
    let program = server_program();
    let (mut rx, child) = app
        .shell()
        .command(&program)
        .spawn()
        .map_err(|e| format!("failed to spawn file server {program}: {e}"))?;
    log::info!("file server started: {program} (pid {})", child.pid());

    std::thread::spawn(move || {
        while let Some(event) = rx.blocking_recv() {
            match event {
                CommandEvent::Stdout(line) => {
                    handle_line(&comms, String::from_utf8_lossy(&line).trim());
                }
                CommandEvent::Stderr(line) => {
                    log::warn!("[file server] {}", String::from_utf8_lossy(&line).trim_end());
                }
                CommandEvent::Terminated(status) => {
                    log::info!("[file server] terminated with code {:?}", status.code);
                    break;
                }
                _ => {}
            }
        }
    });

    Ok(FileServerHandle {
        child: Mutex::new(Some(child)),
    })
}

pub(crate) fn handle_line(comms: &CommsState, line: &str) {
    match parse_port_message(line) {
        Some(port) => {
            log::info!("file server listening on port {port}");
            comms.set_port(port);
        }
        None => log::info!("[file server] {line}"),
    }
}

pub(crate) fn parse_port_message(line: &str) -> Option<u16> {
    match serde_json::from_str::<ServerMessage>(line) {
        Ok(ServerMessage::FileServerPort(port)) => Some(port),
        Err(_) => None,
    }
}

impl FileServerHandle {
    /// Kills the child if it is still running. No drain of in-flight
    /// requests; the frontend is already gone at this point.
    pub fn shutdown(&self) {
        if let Some(child) = self.child.lock().take() {
            let pid = child.pid();
            match child.kill() {
                Ok(()) => log::info!("file server stopped (pid {pid})"),
                Err(e) => log::warn!("failed to stop file server (pid {pid}): {e}"),
            }
        }
    }
}
