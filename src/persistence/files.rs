use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the agenda directory - checks for a local .agenda first, then falls
/// back to the global ~/.agenda
pub fn get_agenda_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_agenda(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".agenda"))
}

/// Find a local .agenda directory by walking up the directory tree
fn find_local_agenda(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let agenda_dir = current.join(".agenda");
        if agenda_dir.is_dir() {
            return Some(agenda_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the agenda directory exists
pub fn ensure_agenda_dir() -> Result<PathBuf> {
    let dir = get_agenda_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Path to the snapshot file holding the full agenda state
pub fn snapshot_file() -> Result<PathBuf> {
    Ok(ensure_agenda_dir()?.join("agenda.json"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
