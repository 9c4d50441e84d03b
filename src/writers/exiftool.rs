use crate::error::AppError;
use crate::metadata::KeywordUpdate;
use crate::writer::MetadataWriter;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct ExifTool {
    path: PathBuf,
}

impl ExifTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        log::debug!("Using exiftool at {:?}", path);
        Self { path }
    }

    /// Runs `exiftool -ver`, mostly to fail early on a wrong binary path.
    pub fn version(&self) -> Result<String, AppError> {
        let output = Command::new(&self.path)
            .arg("-ver")
            .output()
            .map_err(|source| AppError::ToolLaunch {
                tool: self.path.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(AppError::Tool {
                path: self.path.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Arguments for one exiftool call: drop the keyword, add it back, set the
/// scalar fields, and rewrite `target` in place keeping its timestamps.
pub fn build_args(target: &Path, update: &KeywordUpdate<'_>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        format!("-keywords-={}", update.keyword).into(),
        format!("-keywords+={}", update.keyword).into(),
    ];
    for (tag, value) in update.fields.present() {
        args.push(format!("-{}={}", tag, value).into());
    }
    args.push("-overwrite_original".into());
    args.push("-preserve".into());
    args.push(target.as_os_str().to_os_string());
    args
}

impl MetadataWriter for ExifTool {
    fn apply(&self, path: &Path, update: &KeywordUpdate<'_>) -> Result<(), AppError> {
        let args = build_args(path, update);
        log::trace!("Running {:?} {:?}", self.path, args);

        let output = Command::new(&self.path)
            .args(&args)
            .output()
            .map_err(|source| AppError::ToolLaunch {
                tool: self.path.clone(),
                source,
            })?;

        if output.status.success() {
            log::debug!("Wrote keyword {:?} to {:?}", update.keyword, path);
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(AppError::Tool {
                path: self.path.clone(),
                status: output.status,
                stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataFields;

    #[test]
    fn test_args_remove_before_add_and_end_with_target() {
        let fields = MetadataFields {
            title: Some("Golden hour".to_string()),
            copyright: Some("(c) 2024 Jane Doe".to_string()),
            ..Default::default()
        };
        let update = KeywordUpdate {
            keyword: "sunset",
            fields: &fields,
        };
        let args = build_args(Path::new("photos/a.png"), &update);

        let expected: Vec<OsString> = [
            "-keywords-=sunset",
            "-keywords+=sunset",
            "-copyright=(c) 2024 Jane Doe",
            "-title=Golden hour",
            "-overwrite_original",
            "-preserve",
            "photos/a.png",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_missing_binary_is_launch_error() {
        let tool = ExifTool::new("/nonexistent/bin/exiftool-for-tests");
        let fields = MetadataFields::default();
        let update = KeywordUpdate {
            keyword: "beach",
            fields: &fields,
        };
        let err = tool.apply(Path::new("a.jpg"), &update).unwrap_err();
        assert!(matches!(err, AppError::ToolLaunch { .. }));
        assert!(matches!(tool.version(), Err(AppError::ToolLaunch { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_decides_success() {
        let fields = MetadataFields::default();
        let update = KeywordUpdate {
            keyword: "beach",
            fields: &fields,
        };

        assert!(ExifTool::new("true").apply(Path::new("a.jpg"), &update).is_ok());

        let err = ExifTool::new("false")
            .apply(Path::new("a.jpg"), &update)
            .unwrap_err();
        match err {
            AppError::Tool { status, .. } => assert!(!status.success()),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_stderr_is_kept_in_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("failing-exiftool");
        std::fs::write(&script, "#!/bin/sh\necho 'boom: bad file' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let fields = MetadataFields::default();
        let update = KeywordUpdate {
            keyword: "beach",
            fields: &fields,
        };
        let tool = ExifTool::new(&script);

        // A freshly written script can briefly be "text file busy" while
        // another test thread forks.
        let mut result = tool.apply(Path::new("a.jpg"), &update);
        for _ in 0..5 {
            if !matches!(result, Err(AppError::ToolLaunch { .. })) {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(50));
            result = tool.apply(Path::new("a.jpg"), &update);
        }

        let err = result.unwrap_err();
        match &err {
            AppError::Tool { stderr, .. } => assert_eq!(stderr, "boom: bad file"),
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("boom: bad file"));
    }
}
