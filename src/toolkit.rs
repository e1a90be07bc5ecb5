use std::path::PathBuf;

use tauri::State;

/// Location of the FSL installation, resolved once at startup and
/// threaded through managed state instead of being looked up from the
/// environment inside every handler.
#[derive(Debug, Clone)]
pub struct ToolkitConfig {
    fsl_dir: PathBuf,
}

impl ToolkitConfig {
    pub fn new(fsl_dir: impl Into<PathBuf>) -> Self {
        Self {
            fsl_dir: fsl_dir.into(),
        }
    }

    /// Reads `FSLDIR`. An unset variable is not an error here: the
    /// resulting relative paths simply fail at spawn time, which is
    /// where the user sees it.
    pub fn from_env() -> Self {
        let fsl_dir = match std::env::var_os("FSLDIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                log::warn!("FSLDIR is not set; FSL commands will fail to spawn");
                PathBuf::new()
            }
        };
        Self { fsl_dir }
    }

    /// Directory holding the FSL tool executables.
    pub fn bin_dir(&self) -> PathBuf {
        self.fsl_dir.join("share").join("fsl").join("bin")
    }

    /// Directory holding the FSL standard reference images.
    pub fn standard_dir(&self) -> PathBuf {
        self.fsl_dir.join("data").join("standard")
    }

    /// Path to the MNI152 brain-extracted reference at the requested
    /// resolution; only 1mm and 2mm exist.
    pub fn mni_reference(&self, mm: u8) -> Option<PathBuf> {
        let file_name = match mm {
            1 => "MNI152_T1_1mm_brain.nii.gz",
            2 => "MNI152_T1_2mm_brain.nii.gz",
            _ => return None,
        };
        Some(self.standard_dir().join(file_name))
    }
}

#[tauri::command]
pub fn mni_reference(toolkit: State<'_, ToolkitConfig>, mm: u8) -> Option<String> {
    toolkit
        .mni_reference(mm)
        .map(|path| path.to_string_lossy().to_string())
}
