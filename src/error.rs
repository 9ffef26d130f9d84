use thiserror::Error;

/// Errors raised while configuring or laying out a donut.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DonutError {
    #[error("invalid value {value:?} for `{attribute}`: {reason}")]
    InvalidConfig {
        attribute: &'static str,
        value: String,
        reason: String,
    },

    /// The progress domain is empty, so values cannot be mapped onto the ring.
    #[error("invalid bounds: min ({min}) must differ from max ({max})")]
    InvalidBounds { min: i32, max: i32 },
}

impl DonutError {
    pub(crate) fn invalid_config(
        attribute: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            attribute,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
