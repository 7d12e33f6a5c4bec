use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use crate::cli::Args;
use crate::compositing::OutputFormat;

/// One comparable chunk of a filename: a numeric run or a case-folded
/// text run. Numeric runs order before text runs, so `123.png` sorts
/// ahead of `abc.png`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortSegment {
    Number(u128),
    Text(String),
}

static DIGIT_RUNS: OnceLock<Regex> = OnceLock::new();

/// Split a filename into alternating text and digit runs so embedded
/// counters compare numerically: `img2.png` sorts before `img10.png`.
///
/// Digit runs too long for a u128 fall back to string comparison. Any
/// input is valid; there are no error conditions.
pub fn natural_sort_key(name: &str) -> Vec<SortSegment> {
    let digits = DIGIT_RUNS.get_or_init(|| Regex::new(r"\d+").unwrap());

    let mut key = Vec::new();
    let mut last = 0;
    for run in digits.find_iter(name) {
        if run.start() > last {
            key.push(SortSegment::Text(name[last..run.start()].to_lowercase()));
        }
        key.push(
            run.as_str()
                .parse()
                .map(SortSegment::Number)
                .unwrap_or_else(|_| SortSegment::Text(run.as_str().to_string())),
        );
        last = run.end();
    }
    if last < name.len() {
        key.push(SortSegment::Text(name[last..].to_lowercase()));
    }
    key
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.blue} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg} ({eta})",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Validate command line arguments
pub fn validate_inputs(args: &Args) -> Result<()> {
    if let Some(input_dir) = &args.input_dir {
        if !input_dir.exists() {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {}",
                input_dir.display()
            ));
        }
        if !input_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "Input path is not a directory: {}",
                input_dir.display()
            ));
        }
    }

    let extensions = args.parse_extensions();
    if extensions.is_empty() {
        return Err(anyhow::anyhow!("No valid extensions specified"));
    }

    // Surface a bad layout string before any decoding starts.
    if let Err(message) = args.parse_layout() {
        return Err(anyhow::Error::msg(message));
    }

    // Same for an output extension no encoder handles.
    if !args.list_layouts && !args.dry_run {
        OutputFormat::from_path(&args.output_path)?;
    }

    Ok(())
}

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a file has one of the specified extensions
pub fn has_valid_extension(path: &Path, extensions: &[String]) -> bool {
    if let Some(ext) = get_file_extension(path) {
        extensions.contains(&ext)
    } else {
        false
    }
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

/// Print warning message
#[allow(dead_code)]
pub fn warn_println(message: &str) {
    println!("{} {}", style("[WARNING]").yellow().bold(), message);
}
