use thiserror::Error;

/// The common error type used by this crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InspectorError {
    /// A panel sub-element the controller depends on was not found after the
    /// markup template was injected
    #[error("Overlay markup is missing a required element: {0}")]
    MissingElement(String),

    /// The position store could not be read or written
    #[error("Position storage error: {0}")]
    Storage(String),

    /// A stored position record exists but could not be understood
    #[error("Stored position record is corrupt: {0}")]
    CorruptRecord(String),

    /// A call into the host page failed
    #[error("Host error: {0}")]
    Host(String),

    /// Page-supplied configuration overrides could not be parsed
    #[error("Invalid inspector configuration: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for InspectorError {
    fn from(value: serde_json::Error) -> Self {
        InspectorError::CorruptRecord(format!("{value}"))
    }
}
