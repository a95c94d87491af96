//! Scanner control-frame classifier.
//!
//! The scanner acknowledges configuration commands on the same UART it
//! uses for scan results. This module separates those acknowledgements
//! from real payload with a deliberately simple heuristic:
//!
//! - a frame equal to a known acknowledgement token is control
//! - a short frame starting with a known marker character is control
//! - everything else is payload
//!
//! Both lists are configurable because the scanner's full set of
//! acknowledgements is not documented.

use playreg_core::RegisterConfig;
use playreg_core::constants::{
    BARCODE_ACK_TOKEN, BARCODE_CONTROL_MAX_LENGTH, BARCODE_CONTROL_PREFIXES,
};

/// Classification of a completed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Scanner acknowledgement or command echo.
    Control,
    /// Candidate scanned code.
    Payload,
}

/// Control-frame filter.
///
/// # Examples
///
/// ```
/// use playreg_protocol::{ControlFilter, FrameKind};
///
/// let filter = ControlFilter::default();
/// assert_eq!(filter.classify("3u"), FrameKind::Control);
/// assert_eq!(filter.classify("$01"), FrameKind::Control);
/// assert_eq!(filter.classify("4901234567894"), FrameKind::Payload);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFilter {
    tokens: Vec<String>,
    prefixes: Vec<char>,
    max_length: usize,
}

impl ControlFilter {
    pub fn new(tokens: Vec<String>, prefixes: Vec<char>, max_length: usize) -> Self {
        Self {
            tokens,
            prefixes,
            max_length,
        }
    }

    pub fn from_config(config: &RegisterConfig) -> Self {
        Self::new(
            config.control_tokens.clone(),
            config.control_prefixes.clone(),
            config.control_max_length,
        )
    }

    pub fn is_control(&self, frame: &str) -> bool {
        if self.tokens.iter().any(|token| token == frame) {
            return true;
        }

        frame.len() <= self.max_length
            && frame
                .chars()
                .next()
                .is_some_and(|first| self.prefixes.contains(&first))
    }

    pub fn classify(&self, frame: &str) -> FrameKind {
        if self.is_control(frame) {
            FrameKind::Control
        } else {
            FrameKind::Payload
        }
    }
}

impl Default for ControlFilter {
    fn default() -> Self {
        Self::new(
            vec![BARCODE_ACK_TOKEN.to_string()],
            BARCODE_CONTROL_PREFIXES.to_vec(),
            BARCODE_CONTROL_MAX_LENGTH,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3u", true)]
    #[case("\"", true)]
    #[case("\"ab", true)]
    #[case("$", true)]
    #[case("$123", true)]
    #[case("$1234", false)]
    #[case("\"abcd", false)]
    #[case("3u3u", false)]
    #[case("3U", false)]
    #[case(" 3u", false)]
    #[case("abc", false)]
    #[case("ABC123", false)]
    #[case("", false)]
    fn test_default_heuristic(#[case] frame: &str, #[case] expected: bool) {
        assert_eq!(ControlFilter::default().is_control(frame), expected);
    }

    #[test]
    fn test_configured_lists() {
        let filter = ControlFilter::new(vec!["OK".into(), "ERR".into()], vec!['#'], 2);

        assert!(filter.is_control("OK"));
        assert!(filter.is_control("ERR"));
        assert!(filter.is_control("#1"));
        assert!(!filter.is_control("#12"));
        assert!(!filter.is_control("3u"));
        assert!(!filter.is_control("$1"));
    }

    #[test]
    fn test_from_default_config_matches_default() {
        let config = RegisterConfig::default();
        assert_eq!(ControlFilter::from_config(&config), ControlFilter::default());
    }
}
