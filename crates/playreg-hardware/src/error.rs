//! Peripheral errors.
//!
//! These never escape the register's tick: callers log them and treat the
//! peripheral as having produced nothing this tick.

pub type Result<T> = std::result::Result<T, HardwareError>;

#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// The link to `device` is gone (cable pulled, port closed).
    #[error("{device} disconnected")]
    Disconnected { device: String },

    /// The device did not answer during bring-up or could not be opened.
    #[error("{device} not available: {reason}")]
    NotAvailable { device: String, reason: String },

    /// A write or flush to an open device failed.
    #[error("{device} I/O failed: {reason}")]
    Link { device: String, reason: String },

    /// The device answered with something we cannot use, e.g. a UID of the
    /// wrong length.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl HardwareError {
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    pub fn not_available(device: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotAvailable {
            device: device.into(),
            reason: reason.into(),
        }
    }

    pub fn link(device: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Link {
            device: device.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}
