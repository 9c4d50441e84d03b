use crate::config::AppConfig;
use crate::converter::{self, ConvertOptions};
use crate::error::AppError;
use crate::inputs;
use crate::metadata::{MetadataFields, RunOutcome};
use crate::prompt::Prompter;
use crate::updater;
use crate::walker;
use crate::writer::MetadataWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    CollectingInputs,
    ValidatingDirectory,
    Discovering,
    Converting,
    UpdatingMetadata,
    Reporting,
}

fn enter(stage: Stage) {
    log::debug!("Entering stage {:?}", stage);
}

/// Runs one tagging session. Early exits are reported through the returned
/// outcome; only prompt and input-file I/O errors are returned as `Err`.
pub fn run<P, W>(
    config: &AppConfig,
    prompter: &mut P,
    writer: &W,
) -> Result<RunOutcome, AppError>
where
    P: Prompter + ?Sized,
    W: MetadataWriter + ?Sized,
{
    enter(Stage::CollectingInputs);
    let keywords = match pick_file(prompter, &config.keywords_dir)? {
        Some(path) => inputs::read_lines(&path)?,
        None => Vec::new(),
    };
    let title = match pick_file(prompter, &config.title_dir)? {
        Some(path) => inputs::read_first_line(&path)?,
        None => None,
    };
    let copyright = match pick_file(prompter, &config.copyright_dir)? {
        Some(path) => inputs::read_first_line(&path)?,
        None => None,
    };

    if keywords.is_empty() {
        log::warn!("No keywords selected");
        return Ok(RunOutcome::NoKeywords);
    }
    log::info!("Loaded {} keywords", keywords.len());

    let fields = MetadataFields {
        title,
        copyright,
        author: config.author.clone(),
        subject: config.subject.clone(),
        comment: config.comment.clone(),
    };

    enter(Stage::ValidatingDirectory);
    let directory = match &config.target_directory {
        Some(dir) => dir.clone(),
        None => PathBuf::from(prompter.ask_directory()?),
    };
    if !directory.is_dir() {
        log::error!("Directory {:?} does not exist", directory);
        return Ok(RunOutcome::InvalidDirectory(directory));
    }

    enter(Stage::Discovering);
    let mut images = walker::find_images(&directory, &config.allowed_extensions);
    log::info!("Found {} images in {:?}", images.len(), directory);
    if images.is_empty() {
        return Ok(RunOutcome::NoImages(directory));
    }

    let webp_count = images.iter().filter(|img| img.is_webp()).count();
    let mut converted = 0;
    if webp_count > 0 {
        log::info!("Found {} WebP images", webp_count);
        let convert = match config.convert_webp {
            Some(choice) => choice,
            None => prompter.confirm_conversion(webp_count)?,
        };
        if convert {
            enter(Stage::Converting);
            let options = ConvertOptions {
                jpeg_quality: config.jpeg_quality,
                skip_existing_jpeg: config.skip_existing_jpeg,
            };
            converted = converter::convert_webp_images(&mut images, &options).len();
        }
    }

    enter(Stage::UpdatingMetadata);
    let paths: Vec<PathBuf> = images.into_iter().map(|img| img.path).collect();
    let summary = updater::update_metadata(writer, &paths, &keywords, &fields);

    enter(Stage::Reporting);
    Ok(RunOutcome::Completed {
        total_images: paths.len(),
        converted,
        summary,
    })
}

fn pick_file<P: Prompter + ?Sized>(
    prompter: &mut P,
    dir: &Path,
) -> Result<Option<PathBuf>, AppError> {
    let mut files = inputs::list_files(dir)?;
    let label = dir.display().to_string();
    Ok(prompter
        .choose_file(&label, &files)?
        .filter(|&idx| idx < files.len())
        .map(|idx| files.swap_remove(idx)))
}
