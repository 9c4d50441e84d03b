use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{} exited with {status}: {stderr}", path.display())]
    Tool {
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to launch {}: {source}", tool.display())]
    ToolLaunch {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target already exists: {}", .0.display())]
    TargetExists(PathBuf),

    #[error("Generic error: {0}")]
    Generic(String),
}
