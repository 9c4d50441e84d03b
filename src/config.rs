use crate::cli::Cli;
use crate::error::AppError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "tiff", "bmp", "gif", "webp"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub exiftool_path: PathBuf,
    pub keywords_dir: PathBuf,
    pub title_dir: PathBuf,
    pub copyright_dir: PathBuf,
    #[serde(default)]
    pub target_directory: Option<PathBuf>,
    #[serde(default)]
    pub convert_webp: Option<bool>,
    pub allowed_extensions: HashSet<String>,
    pub jpeg_quality: u8,
    pub skip_existing_jpeg: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            exiftool_path: PathBuf::from("exiftool"),
            keywords_dir: PathBuf::from("keywords"),
            title_dir: PathBuf::from("title"),
            copyright_dir: PathBuf::from("copyright"),
            target_directory: None,
            convert_webp: None,
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            jpeg_quality: 75,
            skip_existing_jpeg: false,
            author: None,
            subject: None,
            comment: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Layers built-in defaults, config files, `TAGGER_*` environment
    /// variables and finally command-line flags.
    pub fn new(cli: &Cli) -> Result<Self, AppError> {
        let env = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::from(path.as_path()));
        }

        let s = builder
            .add_source(Environment::with_prefix("TAGGER"))
            .set_override_option("exiftool_path", path_string(&cli.exiftool))?
            .set_override_option("target_directory", path_string(&cli.directory))?
            .set_override_option("convert_webp", cli.convert_choice())?
            .set_override_option("author", cli.author.clone())?
            .set_override_option("subject", cli.subject.clone())?
            .set_override_option("comment", cli.comment.clone())?
            .set_override_option("jpeg_quality", cli.jpeg_quality.map(i64::from))?
            .set_override_option("log_level", cli.log_level.clone())?
            .build()?;

        let mut config: AppConfig = s.try_deserialize()?;
        config.allowed_extensions = config
            .allowed_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(AppError::Generic(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        if self.allowed_extensions.is_empty() {
            return Err(AppError::Generic("allowed_extensions is empty".to_string()));
        }
        Ok(())
    }
}

fn path_string(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}
