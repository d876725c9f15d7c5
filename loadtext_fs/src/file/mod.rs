//! File operations for loading text with proper encoding handling.
//!
//! This module provides:
//! - The size guard applied before detection
//! - EOL detection and normalization
//! - `load_text_file` and its configurable variants

pub mod eol;
pub mod guard;
pub mod load;

pub use eol::{EolType, detect_eol, normalize_eol};
pub use guard::{DEFAULT_MAX_FILE_SIZE, SizeCheck, check_size};
pub use load::{
    LoadConfig, LoadedText, load_text_file, load_text_file_with_config,
    load_text_file_with_detector,
};
