use crate::error::AppError;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Skip,
    Pick(usize),
}

/// Interprets a menu answer: `0` skips, `1..=n` picks the matching option
/// (returned zero-based), anything else is invalid.
pub fn select_from<T>(options: &[T], input: &str) -> Option<Choice> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: usize = input.parse().ok()?;
    match n {
        0 => Some(Choice::Skip),
        n if n <= options.len() => Some(Choice::Pick(n - 1)),
        _ => None,
    }
}

pub trait Prompter {
    /// Offers `options` under `label`; `None` means skipped.
    fn choose_file(&mut self, label: &str, options: &[PathBuf]) -> Result<Option<usize>, AppError>;
    fn ask_directory(&mut self) -> Result<String, AppError>;
    fn confirm_conversion(&mut self, webp_count: usize) -> Result<bool, AppError>;
}

pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn choose_file(&mut self, label: &str, options: &[PathBuf]) -> Result<Option<usize>, AppError> {
        if options.is_empty() {
            return Ok(None);
        }

        println!("Files available in '{}':", label);
        for (idx, option) in options.iter().enumerate() {
            let name = option
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| option.display().to_string());
            println!("[{}] {}", idx + 1, name);
        }

        let answer: String = Input::new()
            .with_prompt("Enter the number of the file to select, or '0' to skip")
            .validate_with(|input: &String| -> Result<(), &str> {
                select_from(options, input)
                    .map(|_| ())
                    .ok_or("Invalid selection. Please try again.")
            })
            .interact_text()?;

        Ok(match select_from(options, &answer) {
            Some(Choice::Pick(idx)) => Some(idx),
            _ => None,
        })
    }

    fn ask_directory(&mut self) -> Result<String, AppError> {
        let dir: String = Input::new()
            .with_prompt("Enter the directory containing images")
            .interact_text()?;
        Ok(dir.trim().to_string())
    }

    fn confirm_conversion(&mut self, webp_count: usize) -> Result<bool, AppError> {
        Ok(Confirm::new()
            .with_prompt(format!(
                "Found {} WebP images. Convert all of them to JPG?",
                webp_count
            ))
            .default(false)
            .interact()?)
    }
}
