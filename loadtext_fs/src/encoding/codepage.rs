//! Windows codepage identifiers and their `encoding_rs` counterparts.

use std::fmt;

use encoding_rs::Encoding;

/// A Windows codepage identifier.
///
/// `Codepage::AUTO` (zero) asks for the encoding to be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Codepage(pub u32);

impl Codepage {
    pub const AUTO: Codepage = Codepage(0);
    pub const UTF_8: Codepage = Codepage(65001);
    pub const UTF_16LE: Codepage = Codepage(1200);
    pub const UTF_16BE: Codepage = Codepage(1201);
    pub const WINDOWS_1252: Codepage = Codepage(1252);

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn is_auto(self) -> bool {
        self.0 == 0
    }

    /// The `encoding_rs` decoder for this codepage, if one is known.
    pub fn encoding(self) -> Option<&'static Encoding> {
        known_codepages()
            .into_iter()
            .find(|(id, _)| *id == self.0)
            .map(|(_, encoding)| encoding)
    }

    /// Map an `encoding_rs` encoding back to its canonical Windows codepage.
    pub fn from_encoding(encoding: &'static Encoding) -> Option<Codepage> {
        known_codepages()
            .into_iter()
            .find(|(_, candidate)| *candidate == encoding)
            .map(|(id, _)| Codepage(id))
    }

    /// WHATWG name of the encoding behind this codepage.
    pub fn name(self) -> Option<&'static str> {
        self.encoding().map(Encoding::name)
    }
}

impl From<u32> for Codepage {
    fn from(id: u32) -> Self {
        Codepage(id)
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_auto() {
            return write!(f, "0 (auto)");
        }
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Codepage table. The first entry for an encoding is its canonical id.
fn known_codepages() -> [(u32, &'static Encoding); 44] {
    [
        // Unicode
        (65001, encoding_rs::UTF_8),
        (1200, encoding_rs::UTF_16LE),
        (1201, encoding_rs::UTF_16BE),
        // Windows (ANSI)
        (874, encoding_rs::WINDOWS_874),
        (1250, encoding_rs::WINDOWS_1250),
        (1251, encoding_rs::WINDOWS_1251),
        (1252, encoding_rs::WINDOWS_1252),
        (1253, encoding_rs::WINDOWS_1253),
        (1254, encoding_rs::WINDOWS_1254),
        (1255, encoding_rs::WINDOWS_1255),
        (1256, encoding_rs::WINDOWS_1256),
        (1257, encoding_rs::WINDOWS_1257),
        (1258, encoding_rs::WINDOWS_1258),
        // East Asian
        (932, encoding_rs::SHIFT_JIS),
        (936, encoding_rs::GBK),
        (949, encoding_rs::EUC_KR),
        (950, encoding_rs::BIG5),
        (54936, encoding_rs::GB18030),
        (51932, encoding_rs::EUC_JP),
        (50220, encoding_rs::ISO_2022_JP),
        (50221, encoding_rs::ISO_2022_JP),
        (50222, encoding_rs::ISO_2022_JP),
        (20932, encoding_rs::EUC_JP),
        (51936, encoding_rs::GBK),
        (51949, encoding_rs::EUC_KR),
        (20936, encoding_rs::GBK),
        // OEM and Cyrillic
        (866, encoding_rs::IBM866),
        (20866, encoding_rs::KOI8_R),
        (21866, encoding_rs::KOI8_U),
        // ISO 8859. Latin-1, Latin-5 and ASCII decode as their Windows supersets.
        (28592, encoding_rs::ISO_8859_2),
        (28593, encoding_rs::ISO_8859_3),
        (28594, encoding_rs::ISO_8859_4),
        (28595, encoding_rs::ISO_8859_5),
        (28596, encoding_rs::ISO_8859_6),
        (28597, encoding_rs::ISO_8859_7),
        (28598, encoding_rs::ISO_8859_8),
        (38598, encoding_rs::ISO_8859_8_I),
        (28603, encoding_rs::ISO_8859_13),
        (28605, encoding_rs::ISO_8859_15),
        (28591, encoding_rs::WINDOWS_1252),
        (28599, encoding_rs::WINDOWS_1254),
        (20127, encoding_rs::WINDOWS_1252),
        // Macintosh
        (10000, encoding_rs::MACINTOSH),
        (10007, encoding_rs::X_MAC_CYRILLIC),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_codepages() {
        assert_eq!(Codepage::UTF_8.encoding(), Some(encoding_rs::UTF_8));
        assert_eq!(Codepage::UTF_16LE.encoding(), Some(encoding_rs::UTF_16LE));
        assert_eq!(Codepage::UTF_16BE.encoding(), Some(encoding_rs::UTF_16BE));
    }

    #[test]
    fn test_legacy_codepages() {
        assert_eq!(Codepage(1251).encoding(), Some(encoding_rs::WINDOWS_1251));
        assert_eq!(Codepage(932).encoding(), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(Codepage(28591).encoding(), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(Codepage(20866).name(), Some("KOI8-R"));
    }

    #[test]
    fn test_unknown_codepage() {
        assert_eq!(Codepage(12345).encoding(), None);
        assert_eq!(Codepage::AUTO.encoding(), None);
        assert_eq!(Codepage(12345).name(), None);
    }

    #[test]
    fn test_from_encoding_prefers_canonical_id() {
        assert_eq!(Codepage::from_encoding(encoding_rs::WINDOWS_1252), Some(Codepage(1252)));
        assert_eq!(Codepage::from_encoding(encoding_rs::GBK), Some(Codepage(936)));
        assert_eq!(Codepage::from_encoding(encoding_rs::EUC_JP), Some(Codepage(51932)));
        assert_eq!(Codepage::from_encoding(encoding_rs::UTF_8), Some(Codepage::UTF_8));
        assert_eq!(Codepage::from_encoding(encoding_rs::X_USER_DEFINED), None);
    }

    #[test]
    fn test_table_ids_are_unique() {
        let table = known_codepages();
        for (i, (id, _)) in table.iter().enumerate() {
            assert!(
                table[i + 1..].iter().all(|(other, _)| other != id),
                "codepage {} listed twice",
                id
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Codepage::UTF_8.to_string(), "65001 (UTF-8)");
        assert_eq!(Codepage::AUTO.to_string(), "0 (auto)");
        assert_eq!(Codepage(4242).to_string(), "4242");
    }
}
