//! Launcher icon export.
//!
//! Resizes one square source image into every entry of an [`IconSpec`]
//! table, writing `<output_root>/<folder>/<file_name>` as PNG. Non-square
//! sources are stretched, never cropped.

use image::imageops::{self, FilterType};
use image::ImageFormat;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errors related to icon export
#[derive(Error, Debug)]
pub enum IconExportError {
    #[error("Source image not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IconExportResult<T> = Result<T, IconExportError>;

/// One output folder and the square pixel size written into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub folder: &'static str,
    pub size: u32,
}

/// Classic (non-adaptive) Android launcher densities
pub const DEFAULT_ICON_SIZES: &[IconSpec] = &[
    IconSpec { folder: "mipmap-mdpi", size: 48 },
    IconSpec { folder: "mipmap-hdpi", size: 72 },
    IconSpec { folder: "mipmap-xhdpi", size: 96 },
    IconSpec { folder: "mipmap-xxhdpi", size: 144 },
    IconSpec { folder: "mipmap-xxxhdpi", size: 192 },
];

pub const DEFAULT_SOURCE_IMAGE: &str = "logo.png";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const ICON_FILE_NAME: &str = "ic_launcher.png";

/// Configuration for one export run
#[derive(Debug, Clone)]
pub struct IconExportConfig {
    /// Source raster image, assumed square
    pub source: PathBuf,
    /// Directory the size folders are created under
    pub output_root: PathBuf,
    pub sizes: Vec<IconSpec>,
    pub file_name: String,
}

impl Default for IconExportConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE_IMAGE),
            output_root: PathBuf::from(DEFAULT_OUTPUT_DIR),
            sizes: DEFAULT_ICON_SIZES.to_vec(),
            file_name: ICON_FILE_NAME.to_string(),
        }
    }
}

impl IconExportConfig {
    pub fn new(source: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    pub fn with_sizes(mut self, sizes: Vec<IconSpec>) -> Self {
        self.sizes = sizes;
        self
    }
}

/// A file written by [`export`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedIcon {
    pub path: PathBuf,
    pub size: u32,
}

/// Export every configured size.
///
/// Fails before touching the output tree if the source is missing.
pub fn export(config: &IconExportConfig) -> IconExportResult<Vec<ExportedIcon>> {
    if !config.source.exists() {
        return Err(IconExportError::SourceNotFound(config.source.clone()));
    }

    fs::create_dir_all(&config.output_root)?;

    // RGBA keeps transparency and gives opaque sources a full alpha channel.
    let source = image::open(&config.source)?.to_rgba8();

    let mut written = Vec::with_capacity(config.sizes.len());
    for spec in &config.sizes {
        let out_dir = config.output_root.join(spec.folder);
        fs::create_dir_all(&out_dir)?;

        let resized = imageops::resize(&source, spec.size, spec.size, FilterType::Lanczos3);

        let out_path = out_dir.join(&config.file_name);
        resized.save_with_format(&out_path, ImageFormat::Png)?;

        info!("Created {} ({}x{})", out_path.display(), spec.size, spec.size);
        written.push(ExportedIcon {
            path: out_path,
            size: spec.size,
        });
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_square_logo(path: &Path, side: u32) {
        let img = RgbaImage::from_fn(side, side, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 0])
            }
        });
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = IconExportConfig::default();
        assert_eq!(config.source, PathBuf::from("logo.png"));
        assert_eq!(config.output_root, PathBuf::from("output"));
        assert_eq!(config.file_name, "ic_launcher.png");
        assert_eq!(config.sizes.len(), 5);
        assert_eq!(config.sizes[0], IconSpec { folder: "mipmap-mdpi", size: 48 });
        assert_eq!(config.sizes[4], IconSpec { folder: "mipmap-xxxhdpi", size: 192 });
    }

    #[test]
    fn test_export_writes_every_size() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("logo.png");
        write_square_logo(&source, 256);
        let output = dir.path().join("output");

        let written = export(&IconExportConfig::new(&source, &output)).unwrap();

        assert_eq!(written.len(), 5);
        for spec in DEFAULT_ICON_SIZES {
            let path = output.join(spec.folder).join("ic_launcher.png");
            assert!(path.exists(), "missing {}", path.display());
            assert_eq!(image::image_dimensions(&path).unwrap(), (spec.size, spec.size));
        }
    }

    #[test]
    fn test_missing_source_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("output");

        let err = export(&IconExportConfig::new(dir.path().join("logo.png"), &output)).unwrap_err();

        assert!(matches!(err, IconExportError::SourceNotFound(_)));
        assert!(err.to_string().contains("logo.png"));
        assert!(!output.exists());
    }

    #[test]
    fn test_output_has_alpha_channel() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("opaque.png");
        RgbImage::from_pixel(100, 100, Rgb([10, 20, 30]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();
        let output = dir.path().join("output");

        let config = IconExportConfig::new(&source, &output)
            .with_sizes(vec![IconSpec { folder: "mipmap-mdpi", size: 48 }]);
        export(&config).unwrap();

        let icon = image::open(output.join("mipmap-mdpi/ic_launcher.png")).unwrap();
        assert!(icon.color().has_alpha());
        assert!(icon.to_rgba8().get_pixel(24, 24)[3] >= 254);
    }

    #[test]
    fn test_non_square_source_is_stretched() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("wide.png");
        RgbImage::from_pixel(300, 100, Rgb([200, 200, 200]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();
        let output = dir.path().join("output");

        let written = export(&IconExportConfig::new(&source, &output)).unwrap();

        for icon in written {
            assert_eq!(image::image_dimensions(&icon.path).unwrap(), (icon.size, icon.size));
        }
    }

    #[test]
    fn test_export_twice_is_stable() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("logo.png");
        write_square_logo(&source, 128);
        let output = dir.path().join("output");
        let config = IconExportConfig::new(&source, &output);

        let first = export(&config).unwrap();
        let first_bytes: Vec<Vec<u8>> = first.iter().map(|i| fs::read(&i.path).unwrap()).collect();

        let second = export(&config).unwrap();
        assert_eq!(first, second);
        for (icon, before) in second.iter().zip(first_bytes) {
            assert_eq!(image::image_dimensions(&icon.path).unwrap(), (icon.size, icon.size));
            assert_eq!(fs::read(&icon.path).unwrap(), before);
        }
    }

    #[test]
    fn test_undecodable_source_is_image_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("logo.png");
        fs::write(&source, b"definitely not a png").unwrap();

        let err = export(&IconExportConfig::new(&source, dir.path().join("output"))).unwrap_err();
        assert!(matches!(err, IconExportError::Image(_)));
    }
}
