use crate::canvas::composite::flatten;
use crate::canvas::surface::DrawingSurface;
use anyhow::{anyhow, Context, Result};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const EXPORT_FILE_NAME: &str = "my-drawing.png";
pub const EXPORT_SUBDIR: &str = "exports";

pub fn exe_relative_export_folder_from_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(EXPORT_SUBDIR))
}

pub fn ensure_export_folder() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    let output = exe_relative_export_folder_from_path(&exe_path)?;
    fs::create_dir_all(&output)
        .with_context(|| format!("create export folder {}", output.display()))?;
    Ok(output)
}

/// Flattens background and ink and writes `my-drawing.png` into `output_dir`.
/// Returns the written path, or `Ok(None)` without touching the filesystem
/// when either source is not yet available.
pub fn export_png(
    background: Option<&RgbaImage>,
    surface: Option<&DrawingSurface>,
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    let (Some(background), Some(surface)) = (background, surface) else {
        debug!("export skipped, background not ready");
        return Ok(None);
    };

    let composite = flatten(background, surface.image());
    let path = output_dir.join(EXPORT_FILE_NAME);
    composite
        .save(&path)
        .with_context(|| format!("write composite to {}", path.display()))?;
    info!(path = %path.display(), "exported drawing");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::{
        exe_relative_export_folder_from_path, export_png, EXPORT_FILE_NAME, EXPORT_SUBDIR,
    };
    use crate::canvas::surface::DrawingSurface;
    use eframe::egui::{Color32, Pos2};
    use image::{Rgba, RgbaImage};
    use std::path::Path;

    #[test]
    fn export_folder_is_sibling_of_exe() {
        let exe = Path::new("/tmp/doodle/bin/doodle-pad");
        let output = exe_relative_export_folder_from_path(exe).expect("output path");
        assert_eq!(output, Path::new("/tmp/doodle/bin").join(EXPORT_SUBDIR));
    }

    #[test]
    fn export_writes_the_fixed_filename() {
        let dir = tempfile::tempdir().expect("tempdir");
        let background = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let mut surface = DrawingSurface::new(4, 4);
        surface.disc(Pos2::new(2.0, 2.0), 1.0, Color32::RED);

        let path = export_png(Some(&background), Some(&surface), dir.path())
            .expect("export")
            .expect("path");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(EXPORT_FILE_NAME));
        assert!(path.exists());
    }

    #[test]
    fn export_twice_without_edits_is_byte_identical() {
        let dir_a = tempfile::tempdir().expect("tempdir");
        let dir_b = tempfile::tempdir().expect("tempdir");
        let background = RgbaImage::from_pixel(8, 8, Rgba([30, 60, 90, 255]));
        let mut surface = DrawingSurface::new(8, 8);
        surface.line(
            Pos2::new(1.0, 1.0),
            Pos2::new(6.0, 6.0),
            Color32::YELLOW,
            2.0,
        );

        let first = export_png(Some(&background), Some(&surface), dir_a.path())
            .expect("export")
            .expect("path");
        let second = export_png(Some(&background), Some(&surface), dir_b.path())
            .expect("export")
            .expect("path");

        let bytes_a = std::fs::read(first).expect("read first");
        let bytes_b = std::fs::read(second).expect("read second");
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn export_before_background_ready_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let surface = DrawingSurface::new(4, 4);

        let result = export_png(None, Some(&surface), dir.path()).expect("no-op export");
        assert_eq!(result, None);
        assert_eq!(dir.path().read_dir().expect("read dir").count(), 0);
    }
}
