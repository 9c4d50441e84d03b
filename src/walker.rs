use crate::metadata::ImageRef;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively collects files under `root` whose extension is in
/// `allowed_extensions` (lowercase, no dot). Entries are visited in file
/// name order so the result is stable for a given tree.
pub fn find_images(root: &Path, allowed_extensions: &HashSet<String>) -> Vec<ImageRef> {
    log::info!("Starting file discovery in {:?}", root);
    log::debug!("Configured allowed extensions: {:?}", allowed_extensions);

    let mut images = Vec::new();
    if !root.is_dir() {
        log::warn!("Scan root {:?} is not a directory", root);
        return images;
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        // Symlinked files count as images; symlinked directories are not entered.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file {
            let path = entry.path();
            log::trace!("Discovered file: {:?}", path);
            if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
                if allowed_extensions.contains(&ext.to_lowercase()) {
                    log::debug!("Found image: {:?}", path);
                    images.push(ImageRef::new(path.to_path_buf()));
                } else {
                    log::trace!("Skipping file due to unsupported extension: {:?}", path);
                }
            } else {
                log::trace!("Skipping file with no extension: {:?}", path);
            }
        } else {
            log::trace!("Skipping non-file entry: {:?}", entry.path());
        }
    }

    log::info!("File discovery complete, {} images found.", images.len());
    images
}
