use clap::Parser;
use std::path::PathBuf;

/// Tag images with keywords, title and copyright through ExifTool.
#[derive(Parser, Debug, Default)]
#[command(name = "image_tagger", version)]
pub struct Cli {
    /// Extra configuration file layered over config/default and config/local
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the exiftool binary
    #[arg(long, value_name = "PATH")]
    pub exiftool: Option<PathBuf>,

    /// Directory to scan for images (prompted for when absent)
    #[arg(long, short = 'd', value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Convert WebP images to JPEG without asking
    #[arg(long, conflicts_with = "no_convert_webp")]
    pub convert_webp: bool,

    /// Leave WebP images as they are without asking
    #[arg(long)]
    pub no_convert_webp: bool,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,

    /// JPEG quality (1-100) used when converting WebP images
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn convert_choice(&self) -> Option<bool> {
        match (self.convert_webp, self.no_convert_webp) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
