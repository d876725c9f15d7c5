//! Statistical codepage detection.

use chardetng::EncodingDetector;
use tracing::{debug, trace};

use super::Codepage;
use crate::DetectionError;

/// One ranked guess from a detector. Rank 0 is the most confident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionCandidate {
    pub codepage: Codepage,
    pub rank: usize,
}

/// Ranks the codepages a byte sample is likely to be encoded in.
///
/// Implementations return candidates ordered most-confident first.
pub trait CodepageDetector: Send + Sync {
    fn detect(&self, sample: &[u8]) -> Result<Vec<DetectionCandidate>, DetectionError>;
}

/// Detector backed by `chardetng`, the heuristic detector used by Firefox.
#[derive(Debug, Clone)]
pub struct ChardetngDetector {
    tld: Option<String>,
    max_candidates: usize,
}

impl Default for ChardetngDetector {
    fn default() -> Self {
        ChardetngDetector { tld: None, max_candidates: 5 }
    }
}

impl ChardetngDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bias guesses toward the encodings common under a top-level domain
    /// (lower-case, no dots, e.g. `"ru"` or `"jp"`).
    pub fn with_tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = Some(tld.into());
        self
    }

    /// Cap the number of returned candidates.
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max.max(1);
        self
    }

    fn tld_hint(&self) -> Result<Option<&[u8]>, DetectionError> {
        let Some(tld) = self.tld.as_deref() else {
            return Ok(None);
        };
        let valid = !tld.is_empty()
            && tld.bytes().all(|b| b.is_ascii() && b != b'.' && !b.is_ascii_uppercase());
        if !valid {
            return Err(DetectionError::InvalidHint(format!(
                "top-level domain {:?} must be lower-case ASCII without dots",
                tld
            )));
        }
        Ok(Some(tld.as_bytes()))
    }
}

impl CodepageDetector for ChardetngDetector {
    fn detect(&self, sample: &[u8]) -> Result<Vec<DetectionCandidate>, DetectionError> {
        let tld = self.tld_hint()?;

        let mut ranked: Vec<Codepage> = Vec::with_capacity(3);
        if let Some(utf16) = detect_utf16_pattern(sample) {
            ranked.push(utf16);
        } else {
            let mut detector = EncodingDetector::new();
            detector.feed(sample, true);

            // The legacy guess ranks first, the guess allowing UTF-8 second.
            for allow_utf8 in [false, true] {
                let guess = detector.guess(tld, allow_utf8);
                match Codepage::from_encoding(guess) {
                    Some(codepage) if !ranked.contains(&codepage) => ranked.push(codepage),
                    Some(_) => {}
                    None => trace!(encoding = guess.name(), "no codepage for guess"),
                }
            }
        }

        ranked.truncate(self.max_candidates);
        debug!(?ranked, sample_len = sample.len(), "detected codepage candidates");

        Ok(ranked
            .into_iter()
            .enumerate()
            .map(|(rank, codepage)| DetectionCandidate { codepage, rank })
            .collect())
    }
}

/// Detect BOM-less UTF-16 from the characteristic positions of null bytes.
fn detect_utf16_pattern(bytes: &[u8]) -> Option<Codepage> {
    if bytes.len() < 32 {
        return None;
    }

    let mut even_null = 0usize;
    let mut odd_null = 0usize;
    let mut even_ascii = 0usize;
    let mut odd_ascii = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        let (null, ascii) = if i % 2 == 0 {
            (&mut even_null, &mut even_ascii)
        } else {
            (&mut odd_null, &mut odd_ascii)
        };
        if b == 0 {
            *null += 1;
        } else if (32..=126).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r') {
            *ascii += 1;
        }
    }

    let half = (bytes.len() / 2) as f64;
    let ratio = |count: usize| count as f64 / half;

    // Little-endian ASCII puts the character first and the zero second.
    if ratio(odd_null) > 0.85 && ratio(even_ascii) > 0.4 {
        return Some(Codepage::UTF_16LE);
    }
    if ratio(even_null) > 0.85 && ratio(odd_ascii) > 0.4 {
        return Some(Codepage::UTF_16BE);
    }
    None
}
