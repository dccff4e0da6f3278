use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{convert_io_error, CliError};

pub fn read_file(path: &Path) -> Result<String, CliError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| convert_io_error(e, path.to_path_buf(), "read"))?;
    Ok(contents)
}

/// Replaces `path` with `contents` in one step.
///
/// The text goes to a temporary file next to `path` which is then renamed
/// over it, so readers see either the old file or the complete new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), CliError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut file =
        NamedTempFile::new_in(&dir).map_err(|e| convert_io_error(e, dir.clone(), "create a temporary file in"))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| convert_io_error(e, file.path().to_path_buf(), "write"))?;
    file.persist(path)
        .map_err(|e| convert_io_error(e.error, path.to_path_buf(), "replace"))?;
    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

pub fn write_stdout(contents: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(contents.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| convert_io_error(e, PathBuf::from("<stdout>"), "write to"))
}
