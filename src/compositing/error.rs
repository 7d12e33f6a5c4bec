use std::path::PathBuf;

use thiserror::Error;

/// Failure modes of the compositing core.
///
/// Every variant carries enough context for the shell to print a
/// self-contained message; nothing here aborts the process.
#[derive(Debug, Error)]
pub enum MergeError {
    /// No files with a recognized image extension were found in the folder.
    #[error("no image files found in '{}'", .dir.display())]
    NoImagesFound { dir: PathBuf },

    /// A directory could not be read during discovery.
    #[error("failed to read directory '{}': {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file could not be opened or decoded.
    #[error("failed to decode image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The composite could not be written to the save path.
    #[error("failed to write composite to '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The requested grid has fewer cells than there are images. The
    /// enumerator never offers such a shape; this guards hand-picked ones.
    #[error("layout {rows}x{cols} cannot hold {count} images")]
    LayoutUnavailable { rows: u32, cols: u32, count: usize },

    /// Compositing was invoked with no source images.
    #[error("cannot composite an empty image sequence")]
    EmptySet,

    /// The save path's extension matches no supported encoder.
    #[error("unsupported output format for '{}' (expected .png, .jpg or .jpeg)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Convenience alias used throughout the compositing core.
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = MergeError::NoImagesFound {
            dir: PathBuf::from("/photos/empty"),
        };
        assert!(err.to_string().contains("/photos/empty"));

        let err = MergeError::LayoutUnavailable {
            rows: 2,
            cols: 2,
            count: 5,
        };
        assert_eq!(err.to_string(), "layout 2x2 cannot hold 5 images");
    }
}
