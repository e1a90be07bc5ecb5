use serde::Serialize;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, FilePath};

use crate::toolkit::ToolkitConfig;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDialogResult {
    pub canceled: bool,
    pub file_paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDialogResult {
    pub canceled: bool,
    pub file_path: Option<String>,
}

impl OpenDialogResult {
    pub(crate) fn from_choice(choice: Option<FilePath>) -> Self {
        match choice {
            Some(path) => Self {
                canceled: false,
                file_paths: vec![path.to_string()],
            },
            None => Self {
                canceled: true,
                file_paths: Vec::new(),
            },
        }
    }
}

#[tauri::command]
pub async fn open_file_dialog(app: AppHandle) -> Result<OpenDialogResult, String> {
    let choice = app.dialog().file().blocking_pick_file();
    Ok(OpenDialogResult::from_choice(choice))
}

#[tauri::command]
pub async fn open_save_file_dialog(app: AppHandle) -> Result<SaveDialogResult, String> {
    let choice = app.dialog().file().blocking_save_file();
    Ok(SaveDialogResult {
        canceled: choice.is_none(),
        file_path: choice.map(|path| path.to_string()),
    })
}

/// Open-file dialog seeded at `$FSLDIR/data/standard`, for picking one
/// of the toolkit's reference images.
#[tauri::command]
pub async fn open_fsl_standard_file_dialog(
    app: AppHandle,
    toolkit: State<'_, ToolkitConfig>,
) -> Result<OpenDialogResult, String> {
    let choice = app
        .dialog()
        .file()
        .set_directory(toolkit.standard_dir())
        .blocking_pick_file();
    Ok(OpenDialogResult::from_choice(choice))
}
