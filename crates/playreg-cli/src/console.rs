//! Terminal console commands.
//!
//! Lines typed at the terminal go to the register's debug stream unchanged,
//! except for two host-only commands that stand in for hardware:
//!
//! ```text
//! touch <x> <y>    tap the screen
//! card <hex uid>   hold a card over the simulated reader
//! ```

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleLine {
    Touch { x: i32, y: i32 },
    Card(Vec<u8>),
    /// Anything else, forwarded to the debug stream.
    Debug(String),
}

impl ConsoleLine {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("touch") => {
                let x = words.next().and_then(|w| w.parse().ok());
                let y = words.next().and_then(|w| w.parse().ok());
                if let (Some(x), Some(y)) = (x, y) {
                    return Self::Touch { x, y };
                }
            }
            Some("card") => {
                if let Some(uid) = words.next().and_then(parse_hex) {
                    return Self::Card(uid);
                }
            }
            _ => {}
        }
        Self::Debug(line.to_string())
    }
}

fn parse_hex(text: &str) -> Option<Vec<u8>> {
    if text.is_empty() || text.len() % 2 != 0 || !text.is_ascii() {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("touch 230 200", ConsoleLine::Touch { x: 230, y: 200 })]
    #[case("  touch  -1 5 ", ConsoleLine::Touch { x: -1, y: 5 })]
    #[case("card DEADBEEF", ConsoleLine::Card(vec![0xDE, 0xAD, 0xBE, 0xEF]))]
    #[case("card 04a1b2c3d4", ConsoleLine::Card(vec![0x04, 0xA1, 0xB2, 0xC3, 0xD4]))]
    fn test_host_commands(#[case] line: &str, #[case] expected: ConsoleLine) {
        assert_eq!(ConsoleLine::parse(line), expected);
    }

    #[rstest]
    #[case("BC:4901234567894")]
    #[case("RFID:DEADBEEF")]
    #[case("touch 1")]
    #[case("touch x y")]
    #[case("card ABC")]
    #[case("card XYZW")]
    #[case("card")]
    #[case("")]
    fn test_everything_else_is_forwarded(#[case] line: &str) {
        assert_eq!(ConsoleLine::parse(line), ConsoleLine::Debug(line.to_string()));
    }
}
