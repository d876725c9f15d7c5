//! Codepage resolution: explicit request, detector guess, then BOM.

use tracing::{debug, warn};

use super::{Codepage, CodepageDetector, DetectionCandidate};
use crate::DetectionError;
use crate::bom::detect_bom;

/// Where a resolved codepage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The caller named the codepage
    Requested,
    /// The detector's top-ranked candidate
    Detected,
    /// UTF-8 was among the candidates but not first
    Utf8Preferred,
    /// The detector returned nothing usable
    Fallback,
    /// A byte-order mark decided it
    Bom,
    /// The file was empty; nothing was resolved
    EmptyFile,
}

/// The codepage a buffer will be decoded with. Never `Codepage::AUTO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCodepage {
    pub codepage: Codepage,
    pub resolution: Resolution,
}

/// Pick a codepage from ranked detector output.
///
/// The top candidate wins unless UTF-8 appears anywhere in the list, since
/// statistical detectors tend to rank a legacy 8-bit codepage above UTF-8
/// for text that is valid UTF-8.
pub fn choose_candidate(
    candidates: &[DetectionCandidate],
    fallback: Codepage,
) -> (Codepage, Resolution) {
    let Some(top) = candidates.iter().min_by_key(|c| c.rank) else {
        return (fallback, Resolution::Fallback);
    };
    if candidates.iter().any(|c| c.codepage == Codepage::UTF_8) {
        let resolution = if top.codepage == Codepage::UTF_8 {
            Resolution::Detected
        } else {
            Resolution::Utf8Preferred
        };
        return (Codepage::UTF_8, resolution);
    }
    if top.codepage.is_auto() {
        return (fallback, Resolution::Fallback);
    }
    (top.codepage, Resolution::Detected)
}

/// Resolve the codepage `bytes` should be decoded with.
///
/// A byte-order mark overrides everything, including an explicit `requested`
/// codepage. The detector only runs when `requested` is `Codepage::AUTO`, and
/// sees at most `sample_size` bytes.
pub fn resolve_codepage(
    bytes: &[u8],
    requested: Codepage,
    detector: &dyn CodepageDetector,
    sample_size: usize,
    fallback: Codepage,
) -> Result<ResolvedCodepage, DetectionError> {
    let (codepage, resolution) = if requested.is_auto() {
        let sample = &bytes[..bytes.len().min(sample_size)];
        let candidates = detector.detect(sample)?;
        choose_candidate(&candidates, fallback)
    } else {
        (requested, Resolution::Requested)
    };

    let resolved = match detect_bom(bytes) {
        Some(bom) => {
            if resolution == Resolution::Requested && bom.codepage != requested {
                warn!(
                    requested = %requested,
                    bom = %bom.codepage,
                    "byte-order mark overrides requested codepage"
                );
            }
            ResolvedCodepage { codepage: bom.codepage, resolution: Resolution::Bom }
        }
        None => ResolvedCodepage { codepage, resolution },
    };

    debug!(codepage = %resolved.codepage, resolution = ?resolved.resolution, "resolved codepage");
    Ok(resolved)
}
