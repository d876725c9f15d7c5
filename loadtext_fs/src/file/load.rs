//! Text file loading: size guard, codepage resolution, decoding, BOM
//! stripping and line ending normalization.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use super::eol::{EolType, normalize_eol};
use super::guard::{DEFAULT_MAX_FILE_SIZE, SizeCheck, check_size};
use crate::bom::strip_bom;
use crate::encoding::{
    ChardetngDetector, Codepage, CodepageDetector, Resolution, decode_to_utf16, resolve_codepage,
};
use crate::{ConversionErrorKind, LoadError, LoadResult};

/// Configuration for text loading operations
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Files larger than this are rejected (default: 1MiB)
    pub max_file_size: u64,
    /// Bytes handed to the detector (default: 1MiB)
    pub sample_size: usize,
    /// Codepage used when the detector has no candidates (default: UTF-8)
    pub fallback_codepage: Codepage,
    /// Top-level domain hint for the detector, e.g. "ru"
    pub detector_tld: Option<String>,
    /// Number of candidates the detector reports (default: 5)
    pub max_candidates: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            sample_size: DEFAULT_MAX_FILE_SIZE as usize,
            fallback_codepage: Codepage::UTF_8,
            detector_tld: None,
            max_candidates: 5,
        }
    }
}

impl LoadConfig {
    /// Defaults overridden by `LOADTEXT_MAX_FILE_SIZE`, `LOADTEXT_SAMPLE_SIZE`,
    /// `LOADTEXT_FALLBACK_CODEPAGE` and `LOADTEXT_DETECTOR_TLD`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = LoadConfig::default();

        if let Some(size) = parse_var(&lookup, "LOADTEXT_MAX_FILE_SIZE") {
            config.max_file_size = size;
        }
        if let Some(size) = parse_var(&lookup, "LOADTEXT_SAMPLE_SIZE") {
            config.sample_size = size;
        }
        if let Some(id) = parse_var::<u32>(&lookup, "LOADTEXT_FALLBACK_CODEPAGE") {
            let codepage = Codepage(id);
            if codepage.encoding().is_some() {
                config.fallback_codepage = codepage;
            } else {
                warn!(codepage = id, "ignoring unsupported fallback codepage");
            }
        }
        if let Some(tld) = lookup("LOADTEXT_DETECTOR_TLD").filter(|tld| !tld.is_empty()) {
            config.detector_tld = Some(tld);
        }

        config
    }

    /// The default detector configured from this config.
    pub fn detector(&self) -> ChardetngDetector {
        let detector = ChardetngDetector::new().with_max_candidates(self.max_candidates);
        match &self.detector_tld {
            Some(tld) => detector.with_tld(tld.clone()),
            None => detector,
        }
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}

/// Result of a text loading operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    /// The decoded content, BOM stripped and normalized to LF
    pub text: String,
    /// Codepage the bytes were decoded with
    pub codepage: Codepage,
    /// How the codepage was chosen
    pub resolution: Resolution,
    /// End-of-line type before normalization
    pub original_eol: EolType,
    /// Size of the file in bytes
    pub byte_len: usize,
}

/// Load a text file, detecting its encoding when `codepage` is
/// `Codepage::AUTO`.
///
/// A byte-order mark in the file wins over `codepage`. The returned text has
/// no leading BOM and uses `\n` line endings.
pub fn load_text_file<P: AsRef<Path>>(path: P, codepage: Codepage) -> LoadResult<String> {
    load_text_file_with_config(path, codepage, &LoadConfig::default()).map(|loaded| loaded.text)
}

/// Load a text file with custom configuration.
pub fn load_text_file_with_config<P: AsRef<Path>>(
    path: P,
    codepage: Codepage,
    config: &LoadConfig,
) -> LoadResult<LoadedText> {
    let detector = config.detector();
    load_text_file_with_detector(path, codepage, config, &detector)
}

/// Load a text file using a caller-supplied detector.
pub fn load_text_file_with_detector<P: AsRef<Path>>(
    path: P,
    codepage: Codepage,
    config: &LoadConfig,
    detector: &dyn CodepageDetector,
) -> LoadResult<LoadedText> {
    let path = path.as_ref();

    // The handle is dropped at the end of this block on every path.
    let bytes = {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let metadata = file
            .metadata()
            .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
        if !metadata.is_file() {
            return Err(LoadError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        let len = metadata.len();

        match check_size(path, len, config.max_file_size)? {
            SizeCheck::Empty => None,
            SizeCheck::Within(len) => Some(read_exact_len(path, file, len)?),
        }
    };

    let Some(bytes) = bytes.filter(|bytes| !bytes.is_empty()) else {
        debug!(path = %path.display(), "empty file");
        return Ok(empty_text(codepage, config));
    };

    decode_text(path, &bytes, codepage, config, detector)
}

/// Read up to `len` bytes; the file may have shrunk since it was sized.
fn read_exact_len(path: &Path, file: File, len: usize) -> LoadResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(len);
    file.take(len as u64)
        .read_to_end(&mut bytes)
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    Ok(bytes)
}

fn empty_text(codepage: Codepage, config: &LoadConfig) -> LoadedText {
    let codepage = if codepage.is_auto() { config.fallback_codepage } else { codepage };
    LoadedText {
        text: String::new(),
        codepage,
        resolution: Resolution::EmptyFile,
        original_eol: EolType::Lf,
        byte_len: 0,
    }
}

fn decode_text(
    path: &Path,
    bytes: &[u8],
    requested: Codepage,
    config: &LoadConfig,
    detector: &dyn CodepageDetector,
) -> LoadResult<LoadedText> {
    let resolved = resolve_codepage(
        bytes,
        requested,
        detector,
        config.sample_size,
        config.fallback_codepage,
    )
    .map_err(|source| LoadError::Detection { path: path.to_path_buf(), source })?;

    let conversion_error = |kind| LoadError::Conversion {
        path: path.to_path_buf(),
        codepage: resolved.codepage,
        kind,
    };

    let units = decode_to_utf16(bytes, resolved.codepage).map_err(conversion_error)?;
    let text = String::from_utf16(strip_bom(&units))
        .map_err(|_| conversion_error(ConversionErrorKind::Malformed { offset: 0 }))?;
    let (text, original_eol) = normalize_eol(&text);

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        codepage = %resolved.codepage,
        eol = ?original_eol,
        "loaded text file"
    );

    Ok(LoadedText {
        text: text.into_owned(),
        codepage: resolved.codepage,
        resolution: resolved.resolution,
        original_eol,
        byte_len: bytes.len(),
    })
}
