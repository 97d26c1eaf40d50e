/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// Only structural failures travel through this type. Recoverable content gaps
/// are reported as diagnostics next to the parsed model.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// OPC package error
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Part not found
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl OoxmlError {
    /// Attach the part path to an XML error message.
    pub(crate) fn in_part(self, part_path: &str) -> Self {
        match self {
            OoxmlError::Xml(msg) => OoxmlError::Xml(format!("{}: {}", part_path, msg)),
            other => other,
        }
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for OoxmlError {
    fn from(err: quick_xml::encoding::EncodingError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
