//! Hand-off to the platform's default SVG viewer.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info};
use svg::Document;

use crate::error::FunplotError;

/// Writes `doc` to a kept temporary file and opens it with the platform
/// viewer, waiting for the launcher command to exit.
///
/// Returns the path of the written file. The file is left in place so the
/// viewer can keep reading it after the launcher returns.
pub(crate) fn show_document(doc: &Document) -> Result<PathBuf, FunplotError> {
    let mut file = tempfile::Builder::new()
        .prefix("funplot-")
        .suffix(".svg")
        .tempfile()?;
    write!(file, "{doc}")?;
    file.flush()?;
    let (_, path) = file.keep().map_err(|err| FunplotError::Io(err.error))?;

    open_with_viewer(&path)?;
    Ok(path)
}

fn open_with_viewer(path: &Path) -> Result<(), FunplotError> {
    let mut command = viewer_command();
    command.arg(path);
    let program = command.get_program().to_string_lossy().into_owned();

    info!(path:? = path, program = program.as_str(); "Opening figure in viewer");
    let status = command
        .status()
        .map_err(|err| FunplotError::Viewer(format!("failed to launch `{program}`: {err}")))?;
    debug!(status:% = status; "Viewer command finished");

    if status.success() {
        Ok(())
    } else {
        Err(FunplotError::Viewer(format!(
            "`{program}` exited with {status}"
        )))
    }
}

fn viewer_command() -> Command {
    if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_command_targets_platform() {
        let command = viewer_command();
        let program = command.get_program().to_string_lossy().into_owned();
        assert!(["open", "cmd", "xdg-open"].contains(&program.as_str()));
    }
}
