use crate::encoding::Codepage;

/// The zero-width no-break space a decoded BOM turns into.
pub const BYTE_ORDER_MARK: u16 = 0xFEFF;

/// Result of BOM detection containing the signalled codepage and BOM length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BomDetectionResult {
    pub codepage: Codepage,
    pub bom_length: usize,
}

/// Detect a Byte Order Mark (BOM) at the start of the given byte slice.
///
/// Returns `None` when the bytes carry no recognized signature.
pub fn detect_bom(bytes: &[u8]) -> Option<BomDetectionResult> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some(BomDetectionResult { codepage: Codepage::UTF_8, bom_length: 3 });
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Some(BomDetectionResult { codepage: Codepage::UTF_16LE, bom_length: 2 });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Some(BomDetectionResult { codepage: Codepage::UTF_16BE, bom_length: 2 });
    }

    None
}

/// Drop a leading U+FEFF code unit left behind by the conversion.
pub fn strip_bom(units: &[u16]) -> &[u16] {
    match units.split_first() {
        Some((&BYTE_ORDER_MARK, rest)) => rest,
        _ => units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_utf8_bom() {
        let result = detect_bom(&[0xEF, 0xBB, 0xBF, b'h', b'i']).unwrap();
        assert_eq!(result.codepage, Codepage::UTF_8);
        assert_eq!(result.bom_length, 3);
    }

    #[test]
    fn test_detect_utf16_boms() {
        let le = detect_bom(&[0xFF, 0xFE, b'a', 0x00]).unwrap();
        assert_eq!(le.codepage, Codepage::UTF_16LE);
        assert_eq!(le.bom_length, 2);

        let be = detect_bom(&[0xFE, 0xFF, 0x00, b'a']).unwrap();
        assert_eq!(be.codepage, Codepage::UTF_16BE);
    }

    #[test]
    fn test_no_bom() {
        assert_eq!(detect_bom(b"plain text"), None);
        assert_eq!(detect_bom(&[0xEF, 0xBB]), None);
        assert_eq!(detect_bom(&[0xFF]), None);
        assert_eq!(detect_bom(&[]), None);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom(&[0xFEFF, 0x61, 0x62]), &[0x61, 0x62]);
        assert_eq!(strip_bom(&[0x61, 0xFEFF]), &[0x61, 0xFEFF]);
        assert_eq!(strip_bom(&[0xFEFF]), &[] as &[u16]);
        assert_eq!(strip_bom(&[]), &[] as &[u16]);
    }

    #[test]
    fn test_strip_bom_only_removes_one() {
        assert_eq!(strip_bom(&[0xFEFF, 0xFEFF, 0x41]), &[0xFEFF, 0x41]);
    }
}
