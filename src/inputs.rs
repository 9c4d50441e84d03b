use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

/// Plain files directly inside `dir`, sorted by name. A missing directory
/// yields an empty list.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !dir.is_dir() {
        log::debug!("Selection directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        } else {
            log::trace!("Skipping non-file entry: {:?}", path);
        }
    }
    files.sort();
    Ok(files)
}

/// Non-empty, trimmed lines of a UTF-8 text file. A missing file yields an
/// empty list.
pub fn read_lines(path: &Path) -> Result<Vec<String>, AppError> {
    if !path.exists() {
        log::warn!("Input file {:?} does not exist", path);
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// First non-empty line of `path`, if any.
pub fn read_first_line(path: &Path) -> Result<Option<String>, AppError> {
    Ok(read_lines(path)?.into_iter().next())
}
