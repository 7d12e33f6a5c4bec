use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk JSON settings for repeatable merges
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub name: Option<String>,
    pub config: MergeConfigJson,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeConfigJson {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
    pub layout: Option<String>,
    pub reverse: Option<bool>,
    pub auto_fill: Option<bool>,
    pub white_to_transparent: Option<bool>,
    pub extensions: Option<String>,
    pub dry_run: Option<bool>,
    pub verbose: Option<bool>,
}

impl Args {
    /// Load configuration from a JSON file and merge with command-line arguments
    /// Command-line arguments take precedence over config file values
    pub fn load_and_merge_config(&mut self) -> Result<()> {
        if let Some(config_path) = self.config_file.clone() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

            let config: ConfigFile = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            self.merge_from_config(config.config);

            if self.verbose {
                eprintln!("Loaded configuration from: {:?}", config_path);
            }
        }
        Ok(())
    }

    fn merge_from_config(&mut self, config: MergeConfigJson) {
        // We check if arguments were explicitly provided on the command line
        let args_from_cli = std::env::args().collect::<Vec<_>>();

        // Input/output paths - only apply if not specified on CLI
        if !args_from_cli.iter().any(|a| a == "-i" || a == "--input") {
            if let Some(input) = config.input_path {
                self.input_dir = Some(PathBuf::from(input));
            }
        }

        if !args_from_cli.iter().any(|a| a == "-o" || a == "--output") {
            if let Some(output) = config.output_path {
                self.output_path = PathBuf::from(output);
            }
        }

        // Layout - only apply if not specified on CLI
        if !args_from_cli.iter().any(|a| a == "-l" || a == "--layout") {
            if let Some(layout) = config.layout {
                self.layout = Some(layout);
            }
        }

        // Boolean flags - only apply if currently false (default)
        if !self.reverse {
            self.reverse = config.reverse.unwrap_or(false);
        }

        if !self.auto_fill {
            self.auto_fill = config.auto_fill.unwrap_or(false);
        }

        if !self.white_to_transparent {
            self.white_to_transparent = config.white_to_transparent.unwrap_or(false);
        }

        if !self.dry_run {
            self.dry_run = config.dry_run.unwrap_or(false);
        }

        if !self.verbose {
            self.verbose = config.verbose.unwrap_or(false);
        }

        // String parameters - only apply if using defaults
        if self.extensions_str == "png,jpg,jpeg,bmp" {
            if let Some(ext) = config.extensions {
                self.extensions_str = ext;
            }
        }
    }
}
