//! Codepage handling: identifiers, detection, resolution and decoding.

pub mod codepage;
pub mod decode;
pub mod detect;
pub mod resolve;

pub use codepage::Codepage;
pub use decode::decode_to_utf16;
pub use detect::{ChardetngDetector, CodepageDetector, DetectionCandidate};
pub use resolve::{Resolution, ResolvedCodepage, choose_candidate, resolve_codepage};
