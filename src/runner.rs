use std::path::Path;
use std::process::Command;

use chrono::Local;
use serde::Serialize;
use tauri::State;

use crate::command_line::{command_argv, command_string, CommandRequest};
use crate::history::{self, HistoryRecord};
use crate::toolkit::ToolkitConfig;

/// What a single tool run produced. Subprocess failures are carried in
/// `error` as data; the only way this command rejects is the IPC
/// boundary itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub error: Option<String>,
    pub stdout: String,
    pub stderr: String,
    pub full_command: String,
    pub history_path: Option<String>,
    pub history_error: Option<String>,
}

#[tauri::command]
pub fn run(toolkit: State<'_, ToolkitConfig>, request: CommandRequest) -> Result<RunOutcome, String> {
    let history_dir = history::default_dir()?;
    Ok(execute(&toolkit, &history_dir, &request))
}

/// Resolves the tool under the FSL bin directory, runs it to
/// completion with an argv array (no shell), and records the request
/// plus outcome in the history directory regardless of success.
pub(crate) fn execute(
    toolkit: &ToolkitConfig,
    history_dir: &Path,
    request: &CommandRequest,
) -> RunOutcome {
    let program = toolkit.bin_dir().join(&request.command);
    let argv = command_argv(request);

    let full_command = {
        let mut line = program.display().to_string();
        for arg in &argv {
            line.push(' ');
            line.push_str(arg);
        }
        line
    };
    log::info!("running: {}", command_string(request));

    let (error, stdout, stderr) = match Command::new(&program).args(&argv).output() {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout).to_string();
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let error = if output.status.success() {
                None
            } else {
                Some(format!("{} exited with {}", request.command, output.status))
            };
            (error, stdout, stderr)
        }
        Err(e) => (
            Some(format!("failed to spawn {}: {e}", program.display())),
            String::new(),
            String::new(),
        ),
    };

    let now = Local::now();
    let record = HistoryRecord {
        command: request.command.clone(),
        opts: request.opts.clone(),
        date: now.to_rfc3339(),
        error: error.clone(),
        stdout: stdout.clone(),
        stderr: stderr.clone(),
        full_command: full_command.clone(),
    };

    let (history_path, history_error) = match history::save(history_dir, &now.naive_local(), &record) {
        Ok(path) => {
            log::info!("history recorded: {}", path.display());
            (Some(path.display().to_string()), None)
        }
        Err(e) => {
            log::warn!("history not recorded: {e}");
            (None, Some(e))
        }
    };

    RunOutcome {
        error,
        stdout,
        stderr,
        full_command,
        history_path,
        history_error,
    }
}
