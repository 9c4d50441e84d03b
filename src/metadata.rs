// src/metadata.rs

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Tiff,
    Bmp,
    Gif,
    WebP,
}

impl ImageKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "tif" | "tiff" => Some(ImageKind::Tiff),
            "bmp" => Some(ImageKind::Bmp),
            "gif" => Some(ImageKind::Gif),
            "webp" => Some(ImageKind::WebP),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }
}

/// An image discovered on disk. Conversion rewrites `path` and `kind` in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
    pub kind: Option<ImageKind>,
}

impl ImageRef {
    pub fn new(path: PathBuf) -> Self {
        let kind = ImageKind::from_path(&path);
        Self { path, kind }
    }

    pub fn is_webp(&self) -> bool {
        self.kind == Some(ImageKind::WebP)
    }
}

/// Scalar fields written alongside every keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub copyright: Option<String>,
    pub subject: Option<String>,
    pub comment: Option<String>,
}

impl MetadataFields {
    /// Tag name and value for every field that is set, in tool argument order.
    pub fn present(&self) -> Vec<(&'static str, &str)> {
        [
            ("author", &self.author),
            ("copyright", &self.copyright),
            ("title", &self.title),
            ("subject", &self.subject),
            ("comment", &self.comment),
        ]
        .into_iter()
        .filter_map(|(tag, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (tag, v))
        })
        .collect()
    }
}

/// One writer call: replace a single keyword and attach the shared fields.
#[derive(Debug, Clone, Copy)]
pub struct KeywordUpdate<'a> {
    pub keyword: &'a str,
    pub fields: &'a MetadataFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Successful writer invocations.
    pub successful: usize,
    pub failed: usize,
    /// Images dropped because they no longer exist on disk.
    pub images_missing: usize,
    /// Images for which every keyword was written.
    pub images_updated: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    NoKeywords,
    InvalidDirectory(PathBuf),
    NoImages(PathBuf),
    Completed {
        total_images: usize,
        converted: usize,
        summary: UpdateSummary,
    },
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::NoKeywords => write!(f, "No keywords selected. Exiting."),
            RunOutcome::InvalidDirectory(dir) => {
                write!(f, "Directory '{}' does not exist.", dir.display())
            }
            RunOutcome::NoImages(dir) => {
                write!(f, "No images found in '{}'. Exiting.", dir.display())
            }
            RunOutcome::Completed {
                total_images,
                converted,
                summary,
            } => {
                write!(
                    f,
                    "Updated metadata for {} out of {} images ({} tool invocations succeeded, \
                     {} failed",
                    summary.images_updated,
                    total_images,
                    summary.successful,
                    summary.failed
                )?;
                if *converted > 0 {
                    write!(f, ", {} converted from WebP", converted)?;
                }
                if summary.images_missing > 0 {
                    write!(f, ", {} missing on disk", summary.images_missing)?;
                }
                write!(f, ").")
            }
        }
    }
}
