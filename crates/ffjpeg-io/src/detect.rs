//! Format detection utilities.
//!
//! Detects image formats from magic bytes and file extensions.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JPEG (JFIF / EXIF) format.
    Jpeg,
    /// PNG format.
    Png,
    /// Unknown/unsupported format.
    Unknown,
}

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

impl Format {
    /// Detects format from file path.
    ///
    /// First checks magic bytes, falls back to extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();

        let mut header = [0u8; 8];
        let n = read_prefix(&mut File::open(path)?, &mut header)?;
        match Self::from_bytes(&header[..n]) {
            Format::Unknown => Ok(Self::from_extension(path)),
            format => Ok(format),
        }
    }

    /// Detects format from file extension only (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("jpg") | Some("jpeg") | Some("jpe") | Some("jfif") => Format::Jpeg,
            Some("png") => Format::Png,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the leading bytes of an encoded image.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&PNG_MAGIC) {
            Format::Png
        } else if bytes.starts_with(&JPEG_MAGIC) {
            Format::Jpeg
        } else {
            Format::Unknown
        }
    }

    /// Returns the canonical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Jpeg => "jpg",
            Format::Png => "png",
            Format::Unknown => "",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Jpeg => write!(f, "JPEG"),
            Format::Png => write!(f, "PNG"),
            Format::Unknown => write!(f, "unknown"),
        }
    }
}

/// Fills as much of `buf` as the reader provides; short files are fine.
fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("photo.jpg"), Format::Jpeg);
        assert_eq!(Format::from_extension("photo.JPEG"), Format::Jpeg);
        assert_eq!(Format::from_extension("icon.Png"), Format::Png);
        assert_eq!(Format::from_extension("scan.tiff"), Format::Unknown);
        assert_eq!(Format::from_extension("noext"), Format::Unknown);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(Format::from_bytes(&PNG_MAGIC), Format::Png);
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]), Format::Jpeg);
        assert_eq!(Format::from_bytes(&[0xFF, 0xD8]), Format::Unknown);
        assert_eq!(Format::from_bytes(b"GIF89a"), Format::Unknown);
        assert_eq!(Format::from_bytes(&[]), Format::Unknown);
    }

    #[test]
    fn test_detect_prefers_magic() {
        let dir = tempfile::tempdir().unwrap();
        // PNG bytes behind a .jpg name
        let path = dir.path().join("mislabeled.jpg");
        std::fs::write(&path, PNG_MAGIC).unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Png);

        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"xx").unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Png);

        assert!(Format::detect(dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn test_extension_names() {
        assert_eq!(Format::Jpeg.extension(), "jpg");
        assert_eq!(Format::Png.extension(), "png");
        assert_eq!(Format::Png.to_string(), "PNG");
    }
}
