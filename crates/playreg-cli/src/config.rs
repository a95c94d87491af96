//! Host configuration file.

use std::path::Path;

use anyhow::Context;
use playreg_core::RegisterConfig;
use serde::{Deserialize, Serialize};

/// Everything the host binary reads from its JSON file.
///
/// Register tunables sit at the top level next to the host-only keys:
///
/// ```json
/// { "barcode_port": "/dev/ttyUSB0", "thank_you_duration_ms": 5000 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Serial device of the barcode scanner. Without it the scanner input
    /// stays silent and only the debug console drives the register.
    pub barcode_port: Option<String>,

    /// Attach a simulated card reader instead of reporting it missing.
    pub card_reader_mock: bool,

    #[serde(flatten)]
    pub register: RegisterConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config
            .register
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "card_reader_mock": true, "visible_rows": 4 }"#).unwrap();

        assert!(config.card_reader_mock);
        assert_eq!(config.barcode_port, None);
        assert_eq!(config.register.visible_rows, 4);
        assert_eq!(config.register.thank_you_duration_ms, 3000);
    }

    #[test]
    fn test_load_rejects_invalid_register_config() {
        let path = std::env::temp_dir().join(format!("playreg-invalid-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "price_step": 0 }"#).unwrap();

        let result = AppConfig::load(&path);
        std::fs::remove_file(&path).unwrap();

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("price_step"), "{message}");
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/nonexistent/playreg.json");
        assert!(AppConfig::load(path).is_err());
    }
}
