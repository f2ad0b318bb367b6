//! # Assets Module
//!
//! Loading costume and backdrop images from disk.

use crate::sprite::Costume;
use crate::{StageError, StageResult};
use log::{debug, error};
use macroquad::prelude::Image;
use std::fs;
use std::path::{Path, PathBuf};

/// Turns a path into a decoded costume.
pub trait ImageLoader {
    fn load(&mut self, path: &Path) -> StageResult<Costume>;

    /// Loads several images, failing on the first one that cannot be read.
    fn load_all(&mut self, paths: &[PathBuf]) -> StageResult<Vec<Costume>> {
        paths.iter().map(|path| self.load(path)).collect()
    }
}

/// Reads PNG/JPEG/BMP files relative to an asset root.
#[derive(Debug, Clone)]
pub struct FileImageLoader {
    root: PathBuf,
}

impl FileImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&mut self, path: &Path) -> StageResult<Costume> {
        let full = self.root.join(path);
        let failed = |reason: String| {
            error!("Could not load {}: {}", full.display(), reason);
            StageError::AssetLoad {
                path: full.clone(),
                reason,
            }
        };

        let bytes = fs::read(&full).map_err(|e| failed(e.to_string()))?;
        let image =
            Image::from_file_with_format(&bytes, None).map_err(|e| failed(e.to_string()))?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!(
            "Loaded {} ({}x{})",
            full.display(),
            image.width,
            image.height
        );
        Ok(Costume::from_image(name, image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::{vec2, GREEN};

    #[test]
    fn test_missing_file_is_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = FileImageLoader::new(dir.path());

        match loader.load(Path::new("nope.png")) {
            Err(StageError::AssetLoad { path, .. }) => {
                assert_eq!(path, dir.path().join("nope.png"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_file_is_asset_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.png"), b"definitely not a png").unwrap();
        let mut loader = FileImageLoader::new(dir.path());
        assert!(matches!(
            loader.load(Path::new("bad.png")),
            Err(StageError::AssetLoad { .. })
        ));
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cat.png");
        Image::gen_image_color(6, 4, GREEN).export_png(file.to_str().unwrap());

        let mut loader = FileImageLoader::new(dir.path());
        let costume = loader.load(Path::new("cat.png")).unwrap();
        assert_eq!(costume.name(), "cat");
        assert_eq!(costume.size(), vec2(6.0, 4.0));
    }

    #[test]
    fn test_load_all_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ok.png");
        Image::gen_image_color(2, 2, GREEN).export_png(file.to_str().unwrap());

        let mut loader = FileImageLoader::new(dir.path());
        let paths = vec![PathBuf::from("ok.png"), PathBuf::from("missing.png")];
        assert!(loader.load_all(&paths).is_err());
        assert_eq!(loader.load_all(&paths[..1]).unwrap().len(), 1);
    }
}
