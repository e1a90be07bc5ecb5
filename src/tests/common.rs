use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use std::{env, fs};

use serde_json::{Map, Value};

use crate::command_line::CommandRequest;

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(1);

pub(super) struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    pub(super) fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = env::temp_dir().join(format!(
            "fslgui-tests-{}-{}-{}",
            std::process::id(),
            nanos,
            id
        ));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    pub(super) fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path.join(relative);
        fs::create_dir_all(&path).expect("create fixture directory");
        path
    }

    #[cfg(unix)]
    pub(super) fn write_script(&self, relative: &str, content: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write script fixture");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("mark script executable");
        path
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Builds a request with the options in the given order.
pub(super) fn request(command: &str, opts: &[(&str, Value)]) -> CommandRequest {
    let mut map = Map::new();
    for (key, value) in opts {
        map.insert((*key).to_string(), value.clone());
    }
    CommandRequest {
        command: command.to_string(),
        opts: map,
    }
}
