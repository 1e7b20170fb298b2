//! Atomic PNG file output.
//!
//! The image is encoded completely in memory, written to a temporary file in
//! the destination directory and then renamed over the destination, so a
//! reader never observes a truncated PNG.

use crate::error::RenderError;
use gradient_png_core::{Compressor, Encoder, PixelSource};
use log::info;
use std::io::Write;
use std::path::Path;

/// Encodes `source` and writes it to `path`. Returns the number of bytes written.
///
/// Nothing is created at `path` if encoding fails.
pub fn write_png<C, S>(
    encoder: &Encoder<'_, C>,
    width: u32,
    height: u32,
    source: &S,
    path: &Path,
) -> Result<usize, RenderError>
where
    C: Compressor,
    S: PixelSource + ?Sized,
{
    let png = encoder.encode(width, height, source)?;
    write_atomic(path, &png)?;
    info!("wrote {width}x{height} PNG ({} bytes) to {}", png.len(), path.display());
    Ok(png.len())
}

/// Writes `bytes` to `path` through a temporary file in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| RenderError::io(dir.display(), e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| RenderError::io(tmp.path().display(), e))?;
    tmp.persist(path)
        .map_err(|e| RenderError::io(path.display(), e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradient_png_core::{EncodeError, Rgb, Solid, SourceError};

    #[test]
    fn write_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");

        let written = write_png(&Encoder::default(), 16, 9, &Solid(Rgb::new(255, 0, 0)), &path)
            .unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, written);

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (16, 9));
        assert!(img.pixels().all(|p| p.0 == [255, 0, 0]));
    }

    #[test]
    fn failed_encode_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        let src = |_: u32, y: u32| -> Result<Rgb, SourceError> {
            if y == 3 {
                Err(SourceError::new("bad row"))
            } else {
                Ok(Rgb::BLACK)
            }
        };

        let result = write_png(&Encoder::default(), 4, 4, &src, &path);
        assert!(matches!(
            result,
            Err(RenderError::Encode(EncodeError::PixelSourceFailure { y: 3, .. }))
        ));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn zero_dimensions_leave_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let result = write_png(&Encoder::default(), 0, 4, &Solid(Rgb::BLACK), &path);
        assert!(matches!(
            result,
            Err(RenderError::Encode(EncodeError::InvalidDimensions { .. }))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"old contents that are longer").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.png");
        let result = write_atomic(&path, b"x");
        assert!(matches!(result, Err(RenderError::Io(_))));
    }
}
