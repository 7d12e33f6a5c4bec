use clap::Parser;
use std::path::PathBuf;

use crate::compositing::LayoutOption;

#[derive(Parser, Debug)]
#[command(
    name = "seqmerge",
    about = "Merge a folder of numbered images into one grid composite",
    long_about = "
seqmerge - Sequence Image Merger

Discovers the image files in a folder (natural-sorted, so img2.png comes
before img10.png), arranges them row-major into a rows x columns grid and
writes the merged sheet as PNG or JPEG. Trailing grid cells without a
source image stay transparent unless --auto-fill replaces them with copies
of the first image.

Example Usage:
  # Merge a folder using the most compact layout
  seqmerge -i ~/frames -o sheet.png

  # Inspect the ranked layout choices for the folder first
  seqmerge -i ~/frames --list-layouts

  # Pick a wide 2x5 sheet, pasting the frames in reverse order
  seqmerge -i ~/frames -o sheet.png --layout 2x5 --reverse

  # Fill the blank cells and knock pure white out to transparency
  seqmerge -i ~/frames -o sheet.png --auto-fill --white-to-transparent

  # JPEG export (alpha is flattened onto white, quality 95)
  seqmerge -i ~/frames -o sheet.jpg

  # Repeatable merges from a JSON settings file; explicit flags win
  seqmerge --config merge.json --verbose"
)]
pub struct Args {
    /// Directory holding the source images
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output image path; the extension picks the format (.png, .jpg)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "merged_image.png"
    )]
    pub output_path: PathBuf,

    /// Grid shape as ROWSxCOLS (e.g. 2x3); defaults to the best-ranked option
    #[arg(short = 'l', long = "layout", value_name = "ROWSxCOLS")]
    pub layout: Option<String>,

    /// Print the ranked layout table for the folder and exit
    #[arg(long = "list-layouts")]
    pub list_layouts: bool,

    /// Paste the images in reverse order
    #[arg(long = "reverse")]
    pub reverse: bool,

    /// Fill trailing blank cells with copies of the first image
    #[arg(long = "auto-fill")]
    pub auto_fill: bool,

    /// Turn exact-white pixels fully transparent after compositing
    #[arg(long = "white-to-transparent")]
    pub white_to_transparent: bool,

    /// Comma-separated list of image extensions to recognize
    #[arg(long = "extensions", default_value = "png,jpg,jpeg,bmp")]
    pub extensions_str: String,

    /// Optional JSON settings file merged under the command line
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Simulate the merge and report what would be written
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Enable verbose output with detailed progress information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Parse the layout string into a grid shape
    pub fn parse_layout(&self) -> Result<Option<LayoutOption>, String> {
        let Some(shape) = &self.layout else {
            return Ok(None);
        };

        let parts: Vec<&str> = shape.split('x').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid layout '{}'. Use ROWSxCOLS (e.g. 2x3)",
                shape
            ));
        }

        let rows = parts[0]
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid row count: '{}'", parts[0]))?;
        let cols = parts[1]
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid column count: '{}'", parts[1]))?;

        if rows == 0 || cols == 0 {
            return Err("Rows and columns must be greater than 0".to_string());
        }

        Ok(Some(LayoutOption::new(rows, cols)))
    }

    /// Parse the extensions string into a vector
    pub fn parse_extensions(&self) -> Vec<String> {
        self.extensions_str
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn extensions(&self) -> Vec<String> {
        self.parse_extensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let args = Args {
            layout: Some("2x3".to_string()),
            ..Default::default()
        };
        assert_eq!(args.parse_layout().unwrap(), Some(LayoutOption::new(2, 3)));

        let args = Args {
            layout: Some("10x1".to_string()),
            ..Default::default()
        };
        assert_eq!(args.parse_layout().unwrap(), Some(LayoutOption::new(10, 1)));
    }

    #[test]
    fn test_parse_layout_absent() {
        let args = Args::default();
        assert_eq!(args.parse_layout().unwrap(), None);
    }

    #[test]
    fn test_parse_layout_invalid() {
        for bad in ["invalid", "2x", "x3", "2x3x4", "0x3", "2x0", "-1x2"] {
            let args = Args {
                layout: Some(bad.to_string()),
                ..Default::default()
            };
            assert!(args.parse_layout().is_err(), "'{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_parse_extensions() {
        let args = Args {
            extensions_str: "png,jpg,bmp".to_string(),
            ..Default::default()
        };
        assert_eq!(args.parse_extensions(), vec!["png", "jpg", "bmp"]);

        let args = Args {
            extensions_str: "PNG, JPG , BMP ".to_string(),
            ..Default::default()
        };
        assert_eq!(args.parse_extensions(), vec!["png", "jpg", "bmp"]);
    }
}

// Default implementation for tests
#[cfg(test)]
impl Default for Args {
    fn default() -> Self {
        Self {
            input_dir: None,
            output_path: PathBuf::from("merged_image.png"),
            layout: None,
            list_layouts: false,
            reverse: false,
            auto_fill: false,
            white_to_transparent: false,
            extensions_str: "png,jpg,jpeg,bmp".to_string(),
            config_file: None,
            dry_run: false,
            verbose: false,
        }
    }
}
