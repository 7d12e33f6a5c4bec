pub mod error;
pub mod export;
pub mod grid;
pub mod layout;
pub mod recolor;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use walkdir::WalkDir;

use crate::utils::{has_valid_extension, natural_sort_key, verbose_println};

pub use error::{MergeError, Result};
pub use export::{save_composite, OutputFormat, JPEG_QUALITY};
pub use grid::{auto_fill, composite};
pub use layout::{layout_options, LayoutOption};
pub use recolor::white_to_transparent;

/// A decoded source image in RGBA8.
///
/// Assets are decoded once per session and kept in memory, so reordering
/// operations rebuild the grid from the cache instead of re-reading files.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub pixels: RgbaImage,
}

impl ImageAsset {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}

#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Lowercased extensions recognized during discovery.
    pub extensions: Vec<String>,
    pub verbose: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            extensions: ["png", "jpg", "jpeg", "bmp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            verbose: false,
        }
    }
}

/// Discovery, decoding and compositing over one folder of images.
pub struct MergeEngine {
    config: MergeConfig,
}

impl MergeEngine {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// List the image files directly inside `dir`, natural-sorted.
    ///
    /// Files without a recognized extension are silently excluded, so a
    /// folder holding stray sidecar files still merges cleanly. An empty
    /// result is an error; the merge pipeline is never entered without at
    /// least one image.
    pub fn discover_images(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        verbose_println(
            self.config.verbose,
            &format!("Scanning directory: {}", dir.display()),
        );

        let mut files = Vec::new();
        let walker = WalkDir::new(dir).follow_links(false).max_depth(1);

        for entry in walker {
            let entry = entry.map_err(|err| MergeError::DirectoryRead {
                path: dir.to_path_buf(),
                source: err.into(),
            })?;
            let path = entry.path();

            if path.is_file() && has_valid_extension(path, &self.config.extensions) {
                files.push(path.to_path_buf());
            }
        }

        if files.is_empty() {
            return Err(MergeError::NoImagesFound {
                dir: dir.to_path_buf(),
            });
        }

        // Numbered sequences must come back in shot order, not byte order.
        files.sort_by_cached_key(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(natural_sort_key)
                .unwrap_or_default()
        });

        verbose_println(
            self.config.verbose,
            &format!("Found {} image files", files.len()),
        );
        Ok(files)
    }

    /// Decode a single file into an RGBA asset.
    pub fn load_asset(&self, path: &Path) -> Result<ImageAsset> {
        verbose_println(self.config.verbose, &format!("Decoding: {}", path.display()));
        let pixels = image::open(path)
            .map_err(|source| MergeError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(ImageAsset {
            path: path.to_path_buf(),
            pixels,
        })
    }

    /// Decode every file into the session's asset cache, preserving order.
    pub fn load_assets(&self, files: &[PathBuf]) -> Result<Vec<ImageAsset>> {
        files.iter().map(|path| self.load_asset(path)).collect()
    }

    /// Ranked grid shapes for `count` images.
    pub fn layout_options(&self, count: usize) -> Vec<LayoutOption> {
        layout::layout_options(count)
    }

    /// Build a composite from the current asset ordering.
    pub fn composite(&self, assets: &[ImageAsset], layout: LayoutOption) -> Result<RgbaImage> {
        grid::composite(assets, layout)
    }

    /// Reverse the paste order in place and rebuild the grid against it.
    ///
    /// The reversed list stays the current ordering for any operation
    /// chained afterwards, so applying this twice restores the original
    /// composite pixel for pixel.
    pub fn reverse_and_composite(
        &self,
        assets: &mut Vec<ImageAsset>,
        layout: LayoutOption,
    ) -> Result<RgbaImage> {
        assets.reverse();
        grid::composite(assets, layout)
    }

    /// Fill the blank trailing cells of a composite with the first asset.
    pub fn auto_fill(
        &self,
        composite: &RgbaImage,
        assets: &[ImageAsset],
        layout: LayoutOption,
    ) -> Result<RgbaImage> {
        grid::auto_fill(composite, assets, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn write_image(dir: &Path, name: &str, color: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        let img: RgbaImage = ImageBuffer::from_pixel(4, 4, Rgba(color));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_discovery_natural_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "img10.png", [0, 0, 0, 255]);
        write_image(dir.path(), "img2.png", [0, 0, 0, 255]);
        write_image(dir.path(), "img1.png", [0, 0, 0, 255]);
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let engine = MergeEngine::new(MergeConfig::default());
        let files = engine.discover_images(dir.path()).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["img1.png", "img2.png", "img10.png"]);
    }

    #[test]
    fn test_discovery_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "top.png", [0, 0, 0, 255]);
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        write_image(&nested, "deep.png", [0, 0, 0, 255]);

        let engine = MergeEngine::new(MergeConfig::default());
        let files = engine.discover_images(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_empty_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "no images here").unwrap();

        let engine = MergeEngine::new(MergeConfig::default());
        assert!(matches!(
            engine.discover_images(dir.path()),
            Err(MergeError::NoImagesFound { .. })
        ));
    }

    #[test]
    fn test_load_assets_reports_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("broken.png");
        std::fs::write(&bogus, b"definitely not a png").unwrap();

        let engine = MergeEngine::new(MergeConfig::default());
        let err = engine.load_assets(&[bogus.clone()]).unwrap_err();
        match err {
            MergeError::Decode { path, .. } => assert_eq!(path, bogus),
            other => panic!("expected Decode error, got {other}"),
        }
    }

    #[test]
    fn test_reverse_twice_restores_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_image(dir.path(), "a1.png", [255, 0, 0, 255]),
            write_image(dir.path(), "a2.png", [0, 255, 0, 255]),
            write_image(dir.path(), "a3.png", [0, 0, 255, 255]),
        ];

        let engine = MergeEngine::new(MergeConfig::default());
        let mut assets = engine.load_assets(&files).unwrap();
        let layout = LayoutOption::new(1, 3);

        let forward = engine.composite(&assets, layout).unwrap();
        let backward = engine.reverse_and_composite(&mut assets, layout).unwrap();
        assert_ne!(forward.as_raw(), backward.as_raw());
        assert_eq!(assets[0].path, files[2]);

        let restored = engine.reverse_and_composite(&mut assets, layout).unwrap();
        assert_eq!(forward.as_raw(), restored.as_raw());
        assert_eq!(assets[0].path, files[0]);
    }
}
