use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use thiserror::Error;

/// Failure taxonomy for [`load_file`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("resource unavailable: {0}")]
    NoResource(#[source] std::io::Error),

    /// Seeking or reading failed after the file was opened.
    #[error("i/o failure: {0}")]
    Io(#[source] std::io::Error),

    /// The buffer allocation failed.
    #[error("failed to allocate {0} bytes")]
    OutOfMemory(usize),
}

/// Whole-file buffer produced by [`load_file`].
///
/// The loader allocates; the caller owns the buffer from then on. The size
/// includes the terminator byte when one was requested.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileBuffer {
    pub data: Vec<u8>,
}

impl FileBuffer {
    /// Buffer length in bytes, terminator included.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Reads `path` into a freshly allocated buffer in one blocking call.
///
/// With `null_terminate`, one extra byte is allocated and set to zero
/// regardless of the file contents, for handing text to APIs that expect
/// C strings.
///
/// Every failure is reported once on the debug channel and mapped into
/// [`LoadError`]. The file handle is released on every path; on failure no
/// buffer escapes.
pub fn load_file(path: impl AsRef<Path>, null_terminate: bool) -> Result<FileBuffer, LoadError> {
    let path = path.as_ref();

    let mut file = File::open(path).map_err(|e| {
        log::debug!("load_file: failed to open {}: {e}", path.display());
        LoadError::NoResource(e)
    })?;

    // Size via seek-to-end, then rewind for the read.
    let size = file
        .seek(SeekFrom::End(0))
        .and_then(|size| file.seek(SeekFrom::Start(0)).map(|_| size))
        .map_err(|e| {
            log::debug!("load_file: failed to measure {}: {e}", path.display());
            LoadError::Io(e)
        })? as usize;

    let allocation = size + usize::from(null_terminate);

    let mut data = Vec::new();
    if data.try_reserve_exact(allocation).is_err() {
        log::debug!(
            "load_file: failed to allocate {allocation} bytes for {}",
            path.display()
        );
        return Err(LoadError::OutOfMemory(allocation));
    }

    data.resize(size, 0);
    file.read_exact(&mut data).map_err(|e| {
        log::debug!("load_file: failed to read {}: {e}", path.display());
        LoadError::Io(e)
    })?;

    if null_terminate {
        data.push(0);
    }

    Ok(FileBuffer { data })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn file_with(contents: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("blob.bin");
        let mut f = File::create(&path).expect("create");
        f.write_all(contents).expect("write");
        (dir, path)
    }

    #[test]
    fn round_trip_without_termination_is_byte_equal() {
        let payload = b"press any key\n\x00\xff binary tail";
        let (_dir, path) = file_with(payload);

        let buf = load_file(&path, false).expect("load");
        assert_eq!(buf.data, payload);
        assert_eq!(buf.size(), payload.len());
    }

    #[test]
    fn termination_appends_exactly_one_zero_byte() {
        let payload = b"shader source";
        let (_dir, path) = file_with(payload);

        let buf = load_file(&path, true).expect("load");
        assert_eq!(buf.size(), payload.len() + 1);
        assert_eq!(&buf.data[..payload.len()], payload);
        assert_eq!(*buf.data.last().unwrap(), 0);
    }

    #[test]
    fn empty_file_with_termination_yields_a_lone_zero() {
        let (_dir, path) = file_with(b"");

        let buf = load_file(&path, true).expect("load");
        assert_eq!(buf.data, vec![0]);
    }

    #[test]
    fn missing_path_is_no_resource() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("does-not-exist");

        let err = load_file(&path, false).unwrap_err();
        assert!(matches!(err, LoadError::NoResource(_)), "got {err:?}");
    }

    #[test]
    fn errors_format_with_their_cause() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_file(dir.path().join("gone"), false).unwrap_err();
        assert!(err.to_string().starts_with("resource unavailable"));
    }
}
