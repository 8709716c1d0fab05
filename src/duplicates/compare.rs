//! Two-stage pairwise file comparison.
//!
//! Both files handed to [`compare`] are already known to share a byte
//! length, so the check starts from the cheapest evidence: the first and
//! last [`CHUNK_SIZE`] bytes. Same-size files that differ usually differ
//! in a header or footer, and the boundary reads reject those without
//! touching the rest of the file. Only when both boundary chunks match
//! and the file is larger than a single chunk is a full BLAKE3 digest
//! computed over each file, from offset zero to the end.
//!
//! File handles live for exactly one call: opened here, closed on every
//! return path, never held across comparisons.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Size of the boundary chunk read from each end of a file (16 KiB).
pub const CHUNK_SIZE: u64 = 16 * 1024;

/// Errors raised while comparing two files.
///
/// These are not recovered locally: a comparison failure aborts the whole
/// run, since a partial duplicate report would be misleading.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// A file disappeared between enumeration and comparison.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading a file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O error while reading a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl CompareError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// How a pairwise comparison was decided.
///
/// The variant records which stage settled the answer; the run summary
/// and the boundary-rejection tests rely on that distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    /// Leading chunks differ; rejected without further I/O.
    HeadMismatch,
    /// Trailing chunks differ; rejected without hashing.
    TailMismatch,
    /// The file fits in one chunk, so the head read covered every byte.
    WholeFileMatch,
    /// Boundary chunks matched but the full digests differ.
    DigestMismatch,
    /// Full digests match; the files are byte-identical.
    DigestMatch,
}

impl CompareOutcome {
    /// Whether this outcome confirms the pair as duplicates.
    #[must_use]
    pub fn is_duplicate(self) -> bool {
        matches!(self, Self::WholeFileMatch | Self::DigestMatch)
    }

    /// Whether the full-content digest stage was reached.
    #[must_use]
    pub fn used_digest(self) -> bool {
        matches!(self, Self::DigestMismatch | Self::DigestMatch)
    }
}

/// Compare two files of equal byte length for identical content.
///
/// `len` is the shared length from the size group. Handing this function
/// files of differing lengths is a grouping bug, caught by a debug
/// assertion rather than surfaced as a user-facing error.
///
/// Stage 1 reads the first `min(len, CHUNK_SIZE)` bytes of both files. A
/// mismatch is final. If the file fits in one chunk the whole content has
/// now been compared and a match is final too. Otherwise the trailing
/// chunk (`len - CHUNK_SIZE` onward) is read and compared the same way.
/// Stage 2 digests each full file with BLAKE3 and compares the digests.
pub fn compare(a: &Path, b: &Path, len: u64) -> Result<CompareOutcome, CompareError> {
    let mut file_a = File::open(a).map_err(|e| CompareError::from_io(a, e))?;
    let mut file_b = File::open(b).map_err(|e| CompareError::from_io(b, e))?;

    #[cfg(debug_assertions)]
    {
        if let (Ok(meta_a), Ok(meta_b)) = (file_a.metadata(), file_b.metadata()) {
            debug_assert_eq!(meta_a.len(), len, "length mismatch for {}", a.display());
            debug_assert_eq!(meta_b.len(), len, "length mismatch for {}", b.display());
        }
    }

    let chunk = len.min(CHUNK_SIZE) as usize;
    let mut buf_a = vec![0u8; chunk];
    let mut buf_b = vec![0u8; chunk];

    read_chunk(&mut file_a, a, &mut buf_a)?;
    read_chunk(&mut file_b, b, &mut buf_b)?;
    if buf_a != buf_b {
        return Ok(CompareOutcome::HeadMismatch);
    }

    // A file no larger than one chunk has now been read in full.
    if len <= CHUNK_SIZE {
        return Ok(CompareOutcome::WholeFileMatch);
    }

    seek_to(&mut file_a, a, len - CHUNK_SIZE)?;
    seek_to(&mut file_b, b, len - CHUNK_SIZE)?;
    read_chunk(&mut file_a, a, &mut buf_a)?;
    read_chunk(&mut file_b, b, &mut buf_b)?;
    if buf_a != buf_b {
        return Ok(CompareOutcome::TailMismatch);
    }

    // Boundary bytes agree but the middle is unseen; settle it with a
    // digest of the entire byte stream.
    let digest_a = digest_file(&mut file_a, a)?;
    let digest_b = digest_file(&mut file_b, b)?;
    if digest_a == digest_b {
        Ok(CompareOutcome::DigestMatch)
    } else {
        Ok(CompareOutcome::DigestMismatch)
    }
}

fn read_chunk(file: &mut File, path: &Path, buf: &mut [u8]) -> Result<(), CompareError> {
    file.read_exact(buf)
        .map_err(|e| CompareError::from_io(path, e))
}

fn seek_to(file: &mut File, path: &Path, pos: u64) -> Result<(), CompareError> {
    file.seek(SeekFrom::Start(pos))
        .map(|_| ())
        .map_err(|e| CompareError::from_io(path, e))
}

/// Stream the whole file into a BLAKE3 hasher, starting from offset zero.
fn digest_file(file: &mut File, path: &Path) -> Result<blake3::Hash, CompareError> {
    seek_to(file, path, 0)?;
    let mut hasher = blake3::Hasher::new();
    io::copy(file, &mut hasher).map_err(|e| CompareError::from_io(path, e))?;
    Ok(hasher.finalize())
}
