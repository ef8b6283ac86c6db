//! Loading the file to visualize.
//!
//! The file is read once, in a single blocking read, before any window exists.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, VizError};
use crate::util::format_bytes;

/// Raw bytes of a source file, read in full.
#[derive(Clone, Debug)]
pub struct SourceBytes {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl SourceBytes {
    /// Read the whole file at `path`.
    ///
    /// The expected length comes from the file metadata; if the read comes up
    /// short the load fails with [`VizError::ShortRead`] instead of handing a
    /// partial buffer to the packer.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let open_error = |source| VizError::FileRead {
            path: path.clone(),
            source,
        };
        let mut file = File::open(&path).map_err(open_error)?;
        let metadata = file.metadata().map_err(open_error)?;
        if metadata.is_dir() {
            return Err(open_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path is a directory",
            )));
        }
        let expected = metadata.len();

        let bytes = read_exact_len(&mut file, expected).map_err(|failure| match failure {
            ReadFailure::Short { read } => VizError::ShortRead {
                path: path.clone(),
                expected,
                read,
            },
            ReadFailure::Io(source) => VizError::FileRead {
                path: path.clone(),
                source,
            },
        })?;

        tracing::info!(
            path = %path.display(),
            size = %format_bytes(expected),
            "loaded source file"
        );

        Ok(Self { path, bytes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Why [`read_exact_len`] could not deliver the requested bytes.
#[derive(Debug)]
pub enum ReadFailure {
    /// The reader hit end of input after `read` bytes.
    Short { read: u64 },
    Io(std::io::Error),
}

/// Read exactly `expected` bytes from `reader`.
pub fn read_exact_len<R: Read>(
    reader: &mut R,
    expected: u64,
) -> std::result::Result<Vec<u8>, ReadFailure> {
    let capacity = usize::try_from(expected).map_err(|_| {
        ReadFailure::Io(std::io::Error::new(
            std::io::ErrorKind::OutOfMemory,
            "file does not fit in memory",
        ))
    })?;

    let mut bytes = Vec::with_capacity(capacity);
    reader
        .take(expected)
        .read_to_end(&mut bytes)
        .map_err(ReadFailure::Io)?;

    let read = bytes.len() as u64;
    if read < expected {
        return Err(ReadFailure::Short { read });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_exact_len() {
        let mut reader = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        let bytes = read_exact_len(&mut reader, 5).unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_read_stops_at_expected_length() {
        // A file that grew after its metadata was read is truncated to the
        // length the canvas was sized for.
        let mut reader = Cursor::new(vec![9u8; 10]);
        let bytes = read_exact_len(&mut reader, 4).unwrap();
        assert_eq!(bytes.len(), 4);
    }

    #[test]
    fn test_short_read_is_reported() {
        let mut reader = Cursor::new(vec![0u8; 3]);
        match read_exact_len(&mut reader, 8) {
            Err(ReadFailure::Short { read }) => assert_eq!(read, 3),
            other => panic!("expected short read, got {other:?}"),
        }
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello canvas").unwrap();
        file.flush().unwrap();

        let source = SourceBytes::load(file.path()).unwrap();
        assert_eq!(source.as_bytes(), b"hello canvas");
        assert_eq!(source.len(), 12);
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = SourceBytes::load(file.path()).unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceBytes::load(dir.path().join("does-not-exist.bin")).unwrap_err();
        assert!(err.is_file_read());
        assert!(matches!(err, VizError::FileRead { .. }));
    }

    #[test]
    fn test_load_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceBytes::load(dir.path()).unwrap_err();
        assert!(err.is_file_read());
    }
}
