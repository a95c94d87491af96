use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in product name candidates, in catalog order.
pub const PRODUCT_NAMES: &[&str] = &[
    "ぶろっこりー",
    "きゅうり",
    "とまと",
    "ぴーまん",
    "りんご",
    "いちご",
    "ばなな",
    "ぱいん",
    "おにぎり",
    "ぎゅうにゅう",
    "りんごじゅーす",
    "おれんじじゅーす",
    "おちゃ",
    "かむかむれもん",
    "おにぎりせんべい",
    "たべっこどうぶつ",
    "くーりっしゅ",
    "ゆきみだいふく",
    "こーんふれーく",
];

/// A resolved cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: u32,
}

impl Item {
    /// Create a new item.
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ￥{}", self.name, self.price)
    }
}

/// One step of a tone sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToneStep {
    pub frequency_hz: u16,
    pub duration_ms: u16,
    /// Pause after the tone is started, before the next step.
    pub wait_ms: u16,
}

impl ToneStep {
    pub const fn new(frequency_hz: u16, duration_ms: u16, wait_ms: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            wait_ms,
        }
    }
}

/// Short beep after a scan or CLEAR.
pub const SCAN_TONE_STEPS: &[ToneStep] = &[ToneStep::new(1760, 80, 0)];

/// Rising chime after a card payment.
pub const PAYMENT_TONE_STEPS: &[ToneStep] = &[
    ToneStep::new(1175, 120, 150),
    ToneStep::new(1568, 140, 160),
    ToneStep::new(2093, 220, 0),
];

/// Chime played when the mode is selected.
pub const STARTUP_TONE_STEPS: &[ToneStep] = &[
    ToneStep::new(1319, 90, 40),
    ToneStep::new(1760, 110, 40),
    ToneStep::new(2093, 150, 0),
];

/// Peripheral wiring handed to the mode at initialization.
///
/// On the host these are informational and only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pins {
    pub barcode_rxd_pin: i32,
    pub barcode_txd_pin: i32,
    pub rfid_sda_pin: i32,
    pub rfid_scl_pin: i32,
}

impl Default for Pins {
    fn default() -> Self {
        // Port C for the scanner, Port A for the reader.
        Self {
            barcode_rxd_pin: 18,
            barcode_txd_pin: 17,
            rfid_sda_pin: 2,
            rfid_scl_pin: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_product_names_not_empty() {
        assert_eq!(PRODUCT_NAMES.len(), 19);
        assert!(PRODUCT_NAMES.iter().all(|name| !name.is_empty()));
    }

    #[rstest]
    #[case(SCAN_TONE_STEPS, 1)]
    #[case(PAYMENT_TONE_STEPS, 3)]
    #[case(STARTUP_TONE_STEPS, 3)]
    fn test_tone_tables_have_no_sentinel(#[case] steps: &[ToneStep], #[case] len: usize) {
        assert_eq!(steps.len(), len);
        assert!(steps.iter().all(|step| step.duration_ms > 0));
    }

    #[test]
    fn test_item_display() {
        let item = Item::new("りんご", 120);
        assert_eq!(item.to_string(), "りんご ￥120");
    }
}
