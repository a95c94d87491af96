//! Code normalization.
//!
//! Raw frames are trimmed and length checked before they reach the catalog
//! or the session. Rejections are silent: the caller simply drops the frame.

use playreg_core::RegisterConfig;
use playreg_core::constants::{BARCODE_MIN_VALID_LENGTH, MIN_VALID_INPUT_LENGTH};

/// Trim surrounding whitespace and require at least `min_length` bytes.
///
/// ```
/// use playreg_protocol::normalize;
///
/// assert_eq!(normalize("  ABC123 ", 2), Some("ABC123"));
/// assert_eq!(normalize(" A ", 2), None);
/// ```
pub fn normalize(raw: &str, min_length: usize) -> Option<&str> {
    let trimmed = raw.trim();
    (trimmed.len() >= min_length).then_some(trimmed)
}

/// Normalizer with the generic and barcode-specific minimum lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeNormalizer {
    min_length: usize,
    barcode_min_length: usize,
}

impl CodeNormalizer {
    pub fn new(min_length: usize, barcode_min_length: usize) -> Self {
        Self {
            min_length,
            barcode_min_length,
        }
    }

    pub fn from_config(config: &RegisterConfig) -> Self {
        Self::new(config.min_input_length, config.barcode_min_length)
    }

    /// Normalize a card UID or any other non-barcode input.
    pub fn normalize<'a>(&self, raw: &'a str) -> Option<&'a str> {
        normalize(raw, self.min_length)
    }

    /// Normalize a scanned code, applying the stricter barcode minimum on
    /// top of the generic one.
    pub fn normalize_barcode<'a>(&self, raw: &'a str) -> Option<&'a str> {
        self.normalize(raw)
            .filter(|code| code.len() >= self.barcode_min_length)
    }
}

impl Default for CodeNormalizer {
    fn default() -> Self {
        Self::new(MIN_VALID_INPUT_LENGTH, BARCODE_MIN_VALID_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AB", Some("AB"))]
    #[case("  AB  ", Some("AB"))]
    #[case("\tDEADBEEF\r", Some("DEADBEEF"))]
    #[case("A", None)]
    #[case("  A  ", None)]
    #[case("", None)]
    #[case("    ", None)]
    #[case("A B", Some("A B"))]
    fn test_generic_normalize(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(CodeNormalizer::default().normalize(raw), expected);
    }

    #[rstest]
    #[case("ABC123", Some("ABC123"))]
    #[case(" ABC123 ", Some("ABC123"))]
    #[case("4901234567894", Some("4901234567894"))]
    #[case("ABC12", None)]
    #[case("  ABC12   ", None)]
    #[case("AB", None)]
    fn test_barcode_normalize(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(CodeNormalizer::default().normalize_barcode(raw), expected);
    }

    #[test]
    fn test_zero_minimum_accepts_empty() {
        assert_eq!(normalize("   ", 0), Some(""));
    }
}
