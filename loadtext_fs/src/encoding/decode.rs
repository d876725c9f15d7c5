//! Two-pass byte to UTF-16 conversion.
//!
//! The first pass runs the decoder over the input into a small scratch
//! buffer and only counts code units. The second pass allocates exactly that
//! many units once and decodes into them. Both passes use a decoder without
//! BOM handling, so a leading BOM comes out as U+FEFF.

use encoding_rs::{DecoderResult, Encoding};
use tracing::trace;

use super::Codepage;
use crate::ConversionErrorKind;

const SCRATCH_UNITS: usize = 4096;

/// Decode `bytes` under `codepage` into UTF-16 code units.
///
/// Fails on the first malformed sequence; no partial output is returned.
pub fn decode_to_utf16(bytes: &[u8], codepage: Codepage) -> Result<Vec<u16>, ConversionErrorKind> {
    let encoding = codepage.encoding().ok_or(ConversionErrorKind::UnsupportedCodepage)?;

    let measured = measure(encoding, bytes)?;
    trace!(codepage = %codepage, input = bytes.len(), measured, "measured decoded length");
    if measured == 0 {
        return Ok(Vec::new());
    }

    let mut units = vec![0u16; measured];
    let written = fill(encoding, bytes, &mut units)?;
    if written != measured {
        return Err(ConversionErrorKind::LengthMismatch { measured });
    }
    Ok(units)
}

/// Pass 1: count the code units `bytes` decodes to.
fn measure(encoding: &'static Encoding, bytes: &[u8]) -> Result<usize, ConversionErrorKind> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut scratch = [0u16; SCRATCH_UNITS];
    let mut consumed = 0;
    let mut total = 0;

    loop {
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(&bytes[consumed..], &mut scratch, true);
        consumed += read;
        total += written;
        match result {
            DecoderResult::InputEmpty => return Ok(total),
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(bad, pending) => {
                return Err(malformed(consumed, bad, pending));
            }
        }
    }
}

/// Pass 2: decode into `out`, which must hold the measured length.
///
/// Some decoders (GBK, Big5, ISO-2022-JP) report `OutputFull` once the free
/// space drops below their worst case, even when the next character fits.
/// The tail is then decoded through a scratch buffer and copied into place.
fn fill(
    encoding: &'static Encoding,
    bytes: &[u8],
    out: &mut [u16],
) -> Result<usize, ConversionErrorKind> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut scratch = [0u16; SCRATCH_UNITS];
    let mut consumed = 0;
    let mut filled = 0;

    loop {
        let (result, read, written) = decoder.decode_to_utf16_without_replacement(
            &bytes[consumed..],
            &mut out[filled..],
            true,
        );
        consumed += read;
        filled += written;
        match result {
            DecoderResult::InputEmpty => return Ok(filled),
            DecoderResult::Malformed(bad, pending) => {
                return Err(malformed(consumed, bad, pending));
            }
            DecoderResult::OutputFull => {}
        }

        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(&bytes[consumed..], &mut scratch, true);
        consumed += read;
        let end = filled + written;
        if end > out.len() {
            return Err(ConversionErrorKind::LengthMismatch { measured: out.len() });
        }
        out[filled..end].copy_from_slice(&scratch[..written]);
        filled = end;
        match result {
            DecoderResult::InputEmpty => return Ok(filled),
            DecoderResult::OutputFull => {}
            DecoderResult::Malformed(bad, pending) => {
                return Err(malformed(consumed, bad, pending));
            }
        }
    }
}

/// Offset of the first byte of a malformed sequence, given how far the
/// decoder had read when it reported it.
fn malformed(consumed: usize, bad: u8, pending: u8) -> ConversionErrorKind {
    let offset = consumed.saturating_sub(bad as usize + pending as usize);
    ConversionErrorKind::Malformed { offset }
}
