use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    // Session errors
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = Error::Config("visible_rows must be greater than 0".into());
        assert_eq!(
            error.to_string(),
            "Configuration error: visible_rows must be greater than 0"
        );

        let error = Error::InvalidCatalog("price ladder overflows u32".into());
        assert_eq!(error.to_string(), "Invalid catalog: price ladder overflows u32");

        let error = Error::InvalidStateTransition {
            from: "ThankYou".into(),
            to: "ThankYou".into(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid state transition from ThankYou to ThankYou"
        );
    }
}
