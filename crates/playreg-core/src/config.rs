//! Runtime configuration for the register mode.
//!
//! Every field defaults to the matching value in [`constants`](crate::constants),
//! so a partial JSON document only overrides what it names.
//!
//! ```
//! use playreg_core::RegisterConfig;
//!
//! let config: RegisterConfig = serde_json::from_str(r#"{ "visible_rows": 5 }"#).unwrap();
//! assert_eq!(config.visible_rows, 5);
//! assert_eq!(config.thank_you_duration_ms, 3000);
//! config.validate().unwrap();
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::PRODUCT_NAMES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    pub barcode_baud_rate: u32,
    pub barcode_frame_gap_ms: u64,
    pub debug_frame_gap_ms: u64,
    pub command_guard_ms: u64,
    pub boot_stabilize_ms: u64,
    pub thank_you_duration_ms: u64,
    pub visible_rows: usize,
    pub price_min: u32,
    pub price_step: u32,
    pub price_levels: u32,
    pub frame_buffer_max_length: usize,
    pub min_input_length: usize,
    pub barcode_min_length: usize,
    /// Frames that are exactly one of these are scanner acknowledgements.
    pub control_tokens: Vec<String>,
    /// Short frames starting with one of these are scanner echoes.
    pub control_prefixes: Vec<char>,
    pub control_max_length: usize,
    pub product_names: Vec<String>,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            barcode_baud_rate: BARCODE_UART_BAUD,
            barcode_frame_gap_ms: BARCODE_FRAME_GAP_MS,
            debug_frame_gap_ms: DEBUG_FRAME_GAP_MS,
            command_guard_ms: BARCODE_COMMAND_GUARD_MS,
            boot_stabilize_ms: BARCODE_BOOT_STABILIZE_MS,
            thank_you_duration_ms: THANK_YOU_DURATION_MS,
            visible_rows: ITEM_VISIBLE_ROWS,
            price_min: PRICE_MIN,
            price_step: PRICE_STEP,
            price_levels: PRICE_LEVELS,
            frame_buffer_max_length: FRAME_BUFFER_MAX_LENGTH,
            min_input_length: MIN_VALID_INPUT_LENGTH,
            barcode_min_length: BARCODE_MIN_VALID_LENGTH,
            control_tokens: vec![BARCODE_ACK_TOKEN.to_string()],
            control_prefixes: BARCODE_CONTROL_PREFIXES.to_vec(),
            control_max_length: BARCODE_CONTROL_MAX_LENGTH,
            product_names: PRODUCT_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl RegisterConfig {
    /// Check the values that would otherwise divide by zero or disable a bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.visible_rows == 0 {
            return Err(Error::Config("visible_rows must be greater than 0".into()));
        }
        if self.price_levels == 0 {
            return Err(Error::Config("price_levels must be greater than 0".into()));
        }
        if self.price_step == 0 {
            return Err(Error::Config("price_step must be greater than 0".into()));
        }
        if self.frame_buffer_max_length == 0 {
            return Err(Error::Config(
                "frame_buffer_max_length must be greater than 0".into(),
            ));
        }
        if price_ladder_max(self.price_min, self.price_step, self.price_levels).is_none() {
            return Err(Error::Config(
                "price_min + (price_levels - 1) * price_step overflows u32".into(),
            ));
        }
        Ok(())
    }

    /// Highest price the ladder can produce, saturating at `u32::MAX` for a
    /// ladder that [`validate`](Self::validate) would reject.
    pub fn price_max(&self) -> u32 {
        price_ladder_max(self.price_min, self.price_step, self.price_levels).unwrap_or(u32::MAX)
    }
}

/// Top rung of a price ladder, or `None` when it does not fit in a `u32`.
pub fn price_ladder_max(price_min: u32, price_step: u32, price_levels: u32) -> Option<u32> {
    price_levels
        .saturating_sub(1)
        .checked_mul(price_step)
        .and_then(|span| price_min.checked_add(span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_matches_constants() {
        let config = RegisterConfig::default();
        assert_eq!(config.barcode_frame_gap_ms, 300);
        assert_eq!(config.command_guard_ms, 120);
        assert_eq!(config.boot_stabilize_ms, 1500);
        assert_eq!(config.visible_rows, 3);
        assert_eq!(config.control_tokens, vec!["3u".to_string()]);
        assert_eq!(config.product_names.len(), PRODUCT_NAMES.len());
        assert_eq!(config.price_max(), 500);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(r#"{ "visible_rows": 0 }"#, "visible_rows")]
    #[case(r#"{ "price_levels": 0 }"#, "price_levels")]
    #[case(r#"{ "price_step": 0 }"#, "price_step")]
    #[case(r#"{ "frame_buffer_max_length": 0 }"#, "frame_buffer_max_length")]
    fn test_validate_rejects_zero(#[case] json: &str, #[case] field: &str) {
        let config: RegisterConfig = serde_json::from_str(json).unwrap();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains(field));
    }

    #[rstest]
    #[case(r#"{ "price_min": 0, "price_step": 4, "price_levels": 2147483648 }"#)]
    #[case(r#"{ "price_min": 4294967295, "price_step": 1, "price_levels": 2 }"#)]
    #[case(r#"{ "price_min": 50, "price_step": 65536, "price_levels": 65537 }"#)]
    fn test_validate_rejects_overflowing_ladder(#[case] json: &str) {
        let config: RegisterConfig = serde_json::from_str(json).unwrap();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("overflows"));
        assert_eq!(config.price_max(), u32::MAX);
    }

    #[rstest]
    #[case(0, 1, 0, Some(0))]
    #[case(50, 10, 46, Some(500))]
    #[case(u32::MAX, 7, 1, Some(u32::MAX))]
    #[case(u32::MAX - 9, 10, 2, None)]
    #[case(0, 4, 1 << 31, None)]
    fn test_price_ladder_max(
        #[case] min: u32,
        #[case] step: u32,
        #[case] levels: u32,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(price_ladder_max(min, step, levels), expected);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RegisterConfig =
            serde_json::from_str(r#"{ "control_tokens": ["3u", "OK"] }"#).unwrap();
        assert_eq!(config.control_tokens.len(), 2);
        assert_eq!(config.control_prefixes, vec!['"', '$']);
        assert_eq!(config.barcode_min_length, 6);
    }
}
