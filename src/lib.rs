// Library exports for reuse by the CLI and other applications
pub mod cli;
pub mod compositing;
pub mod config_file;
pub mod utils;

// Re-export commonly used types
pub use compositing::{
    auto_fill, composite, layout_options, save_composite, white_to_transparent, ImageAsset,
    LayoutOption, MergeConfig, MergeEngine, MergeError, OutputFormat, JPEG_QUALITY,
};
