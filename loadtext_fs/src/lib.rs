//! # loadtext_fs - Encoding-aware text file loading
//!
//! Reads a file and returns its contents as Unicode text, working out the
//! byte encoding when the caller does not name one.
//!
//! Modules:
//! - `bom` for BOM sniffing and stripping (UTF-8/16)
//! - `encoding` for codepage ids, detection, resolution and two-pass decoding
//! - `file` for the size guard, line ending normalization and `load_text_file`

mod bom;
mod encoding;
mod file;

pub use bom::{BomDetectionResult, BYTE_ORDER_MARK, detect_bom, strip_bom};
pub use encoding::{
    ChardetngDetector, Codepage, CodepageDetector, DetectionCandidate, Resolution,
    ResolvedCodepage, choose_candidate, decode_to_utf16, resolve_codepage,
};
pub use file::{
    DEFAULT_MAX_FILE_SIZE, EolType, LoadConfig, LoadedText, SizeCheck, check_size, detect_eol,
    load_text_file, load_text_file_with_config, load_text_file_with_detector, normalize_eol,
};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a detector implementation.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The detector was configured with a hint it cannot use
    #[error("invalid detector hint: {0}")]
    InvalidHint(String),
    /// The detector could not run at all
    #[error("detector unavailable: {0}")]
    Unavailable(String),
}

/// Why a byte buffer could not be converted to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConversionErrorKind {
    /// The bytes are not a valid sequence for the codepage
    #[error("malformed byte sequence at offset {offset}")]
    Malformed { offset: usize },
    /// No decoder is known for the codepage
    #[error("unsupported codepage")]
    UnsupportedCodepage,
    /// The fill pass disagreed with the measure pass
    #[error("decoded length differs from measured length {measured}")]
    LengthMismatch { measured: usize },
}

/// Errors that can occur while loading a text file.
///
/// Every variant carries the path so the caller can tell which file failed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing, locked or otherwise inaccessible
    #[error("{}: cannot open file: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading failed after the file was opened
    #[error("{}: read failed: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is bigger than the configured limit
    #[error("{}: file too big ({size} bytes, limit {limit})", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    /// The codepage detector failed
    #[error("{}: encoding detection failed: {source}", .path.display())]
    Detection {
        path: PathBuf,
        #[source]
        source: DetectionError,
    },
    /// The bytes could not be decoded with the resolved codepage
    #[error("{}: cannot decode as codepage {codepage}: {kind}", .path.display())]
    Conversion {
        path: PathBuf,
        codepage: Codepage,
        #[source]
        kind: ConversionErrorKind,
    },
}

impl LoadError {
    /// The file the failed operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Open { path, .. }
            | LoadError::Read { path, .. }
            | LoadError::FileTooLarge { path, .. }
            | LoadError::Detection { path, .. }
            | LoadError::Conversion { path, .. } => path,
        }
    }
}

/// Result type for text loading operations
pub type LoadResult<T> = Result<T, LoadError>;
