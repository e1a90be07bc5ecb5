mod command_line;
mod comms;
mod dialogs;
mod file_server;
mod history;
mod runner;
mod toolkit;

#[cfg(test)]
mod tests;

use std::process::Stdio;
use std::sync::Arc;

use comms::CommsState;
use file_server::FileServerHandle;
use tauri::{Manager, RunEvent};
use toolkit::ToolkitConfig;

/// External viewers the frontend may ask for instead of the embedded
/// GUI. Anything else is refused.
const EXTERNAL_GUIS: &[&str] = &["fsleyes"];

/// `--dev` opens the devtools on launch.
#[cfg(debug_assertions)]
fn is_dev() -> bool {
    std::env::args().nth(1).as_deref() == Some("--dev")
}

/// Launch a whitelisted external GUI, detached from this process.
/// Returns whether it was launched.
#[tauri::command]
fn launch_external_gui(name: String) -> bool {
    if !EXTERNAL_GUIS.contains(&name.as_str()) {
        log::warn!("refusing to launch non-whitelisted GUI: {name}");
        return false;
    }
    match std::process::Command::new(&name)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => {
            log::info!("launched external GUI {name} (pid {})", child.id());
            true
        }
        Err(e) => {
            log::warn!("unable to launch external GUI {name}: {e}");
            false
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let toolkit = ToolkitConfig::from_env();
    let comms = Arc::new(CommsState::from_env());
    let comms_for_server = comms.clone();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_shell::init())
        .manage(toolkit)
        .manage(comms)
        .setup(move |app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // One background file server per app; its startup
            // handshake fills the comms port slot.
            match file_server::spawn(app.handle(), comms_for_server.clone()) {
                Ok(handle) => {
                    app.manage(handle);
                }
                Err(e) => log::warn!("file server unavailable: {e}"),
            }

            #[cfg(debug_assertions)]
            if is_dev() {
                if let Some(window) = app.get_webview_window("main") {
                    window.open_devtools();
                }
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            runner::run,
            dialogs::open_file_dialog,
            dialogs::open_save_file_dialog,
            dialogs::open_fsl_standard_file_dialog,
            comms::get_comms_info,
            toolkit::mni_reference,
            launch_external_gui,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                log::info!("app shutting down - stopping file server");
                if let Some(server) = app_handle.try_state::<FileServerHandle>() {
                    server.shutdown();
                }
            }
        });
}
