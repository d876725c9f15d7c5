//! Size guard applied before any detection or decoding work.

use std::path::Path;

use crate::{LoadError, LoadResult};

/// Largest file accepted by default (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 0x10_0000;

/// Outcome of a size check that did not reject the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCheck {
    /// Nothing to decode
    Empty,
    /// Within the limit; holds the byte length
    Within(usize),
}

/// Reject files strictly larger than `limit` bytes.
pub fn check_size(path: &Path, len: u64, limit: u64) -> LoadResult<SizeCheck> {
    if len == 0 {
        return Ok(SizeCheck::Empty);
    }
    if len > limit {
        return Err(LoadError::FileTooLarge { path: path.to_path_buf(), size: len, limit });
    }
    let len = usize::try_from(len).map_err(|_| LoadError::FileTooLarge {
        path: path.to_path_buf(),
        size: len,
        limit,
    })?;
    Ok(SizeCheck::Within(len))
}
