use crate::metadata::{KeywordUpdate, MetadataFields, UpdateSummary};
use crate::writer::MetadataWriter;
use std::path::{Path, PathBuf};

/// Applies every keyword to every image that still exists, one writer call
/// per (image, keyword) pair. Failures are logged and counted, never
/// propagated.
pub fn update_metadata<W: MetadataWriter + ?Sized>(
    writer: &W,
    images: &[PathBuf],
    keywords: &[String],
    fields: &MetadataFields,
) -> UpdateSummary {
    log::info!(
        "Starting metadata update for {} images with {} keywords",
        images.len(),
        keywords.len()
    );

    let mut summary = UpdateSummary::default();

    let existing: Vec<&Path> = images
        .iter()
        .map(PathBuf::as_path)
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                log::warn!("Skipping {:?}: file no longer exists", path);
            }
            exists
        })
        .collect();
    summary.images_missing = images.len() - existing.len();

    for path in existing {
        let mut image_ok = true;
        for keyword in keywords {
            let update = KeywordUpdate { keyword, fields };
            match writer.apply(path, &update) {
                Ok(()) => summary.successful += 1,
                Err(e) => {
                    log::error!("Error updating {:?} with keyword {:?}: {}", path, keyword, e);
                    summary.failed += 1;
                    image_ok = false;
                }
            }
        }
        if image_ok && !keywords.is_empty() {
            summary.images_updated += 1;
            log::info!("Updated metadata for {:?}", path);
        }
    }

    log::info!(
        "Metadata update finished: {} succeeded, {} failed.",
        summary.successful,
        summary.failed
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::fake::RecordingWriter;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn images(names: &[&str]) -> (TempDir, Vec<PathBuf>) {
        let dir = tempdir().unwrap();
        let paths = names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, b"img").unwrap();
                path
            })
            .collect();
        (dir, paths)
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_one_call_per_image_and_keyword() {
        let (_dir, paths) = images(&["a.png", "b.jpg"]);
        let writer = RecordingWriter::default();

        let summary = update_metadata(
            &writer,
            &paths,
            &keywords(&["sunset", "beach"]),
            &MetadataFields::default(),
        );

        assert_eq!(writer.call_count(), 4);
        assert_eq!(summary.successful, 4);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.images_updated, 2);
    }

    #[test]
    fn test_failure_on_one_image_does_not_stop_others() {
        let (_dir, paths) = images(&["a.png", "b.jpg"]);
        let writer = RecordingWriter::failing_on_path(paths[0].clone());

        let summary = update_metadata(
            &writer,
            &paths,
            &keywords(&["sunset", "beach"]),
            &MetadataFields::default(),
        );

        assert_eq!(writer.call_count(), 4);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.images_updated, 1);
        assert_eq!(writer.keywords_of(&paths[1]), keywords(&["sunset", "beach"]));
    }

    #[test]
    fn test_failed_keyword_does_not_skip_later_keywords() {
        let (_dir, paths) = images(&["a.png"]);
        let writer = RecordingWriter::failing_on_keyword("sunset");

        let summary = update_metadata(
            &writer,
            &paths,
            &keywords(&["sunset", "beach", "sea"]),
            &MetadataFields::default(),
        );

        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.images_updated, 0);
        assert_eq!(writer.keywords_of(&paths[0]), keywords(&["beach", "sea"]));
    }

    #[test]
    fn test_missing_files_are_never_passed_to_writer() {
        let (dir, mut paths) = images(&["a.png"]);
        paths.push(dir.path().join("deleted.webp"));
        let writer = RecordingWriter::default();

        let summary = update_metadata(
            &writer,
            &paths,
            &keywords(&["beach"]),
            &MetadataFields::default(),
        );

        assert_eq!(summary.images_missing, 1);
        assert_eq!(summary.successful, 1);
        assert!(writer
            .calls
            .borrow()
            .iter()
            .all(|(path, _)| path == &paths[0]));
    }

    #[test]
    fn test_rerun_with_same_keyword_does_not_duplicate() {
        let (_dir, paths) = images(&["a.png"]);
        let writer = RecordingWriter::default();
        let kw = keywords(&["sunset"]);

        update_metadata(&writer, &paths, &kw, &MetadataFields::default());
        update_metadata(&writer, &paths, &kw, &MetadataFields::default());

        assert_eq!(writer.call_count(), 2);
        assert_eq!(writer.keywords_of(&paths[0]), kw);
    }
}
