use crate::error::AppError;
use crate::metadata::{ImageKind, ImageRef};
use image::codecs::jpeg::JpegEncoder;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    pub jpeg_quality: u8,
    /// Refuse to replace an existing `.jpg` instead of overwriting it.
    pub skip_existing_jpeg: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            skip_existing_jpeg: false,
        }
    }
}

/// Converts every WebP image in `images` to JPEG and deletes the original.
/// Converted references are moved to their new path; failures leave the
/// reference untouched. Returns the JPEG paths that were written.
pub fn convert_webp_images(images: &mut [ImageRef], options: &ConvertOptions) -> Vec<PathBuf> {
    let pending = images.iter().filter(|img| img.is_webp()).count();
    log::info!("Converting {} WebP images to JPEG", pending);

    let mut converted = Vec::new();
    for image in images.iter_mut().filter(|img| img.is_webp()) {
        match convert_to_jpeg(&image.path, options) {
            Ok(new_path) => {
                log::info!("Converted and deleted: {:?} -> {:?}", image.path, new_path);
                image.path = new_path.clone();
                image.kind = Some(ImageKind::Jpeg);
                converted.push(new_path);
            }
            Err(e) => {
                log::error!("Failed to convert {:?}: {}", image.path, e);
            }
        }
    }

    log::info!("Converted {} of {} WebP images.", converted.len(), pending);
    converted
}

/// Writes `<stem>.jpg` next to `path` and removes `path`.
pub fn convert_to_jpeg(path: &Path, options: &ConvertOptions) -> Result<PathBuf, AppError> {
    let new_path = path.with_extension("jpg");
    if options.skip_existing_jpeg && new_path.exists() {
        return Err(AppError::TargetExists(new_path));
    }

    log::trace!("Decoding image for conversion: {:?}", path);
    let image = image::io::Reader::open(path)?
        .with_guessed_format()?
        .decode()?;
    let rgb = image.to_rgb8();

    log::trace!("Encoding {}x{} JPEG to {:?}", rgb.width(), rgb.height(), new_path);
    if let Err(e) = write_jpeg(&rgb, &new_path, options.jpeg_quality) {
        if let Err(cleanup) = fs::remove_file(&new_path) {
            log::debug!("Could not remove partial output {:?}: {}", new_path, cleanup);
        }
        return Err(e);
    }

    if let Err(e) = fs::remove_file(path) {
        log::error!("Converted {:?} but could not delete it: {}", path, e);
    }
    Ok(new_path)
}

fn write_jpeg(rgb: &image::RgbImage, target: &Path, quality: u8) -> Result<(), AppError> {
    let mut writer = BufWriter::new(File::create(target)?);
    JpegEncoder::new_with_quality(&mut writer, quality).encode_image(rgb)?;
    // Errors from the final buffered write only surface here.
    writer.flush()?;
    Ok(())
}

/// 1x1 lossless WebP.
#[cfg(test)]
pub(crate) const TINY_WEBP: [u8; 34] = [
    82, 73, 70, 70, 26, 0, 0, 0, 87, 69, 66, 80, 86, 80, 56, 76, 13, 0, 0, 0, 47, 0, 0, 0, 16, 7,
    16, 17, 17, 136, 136, 254, 7, 0,
];
