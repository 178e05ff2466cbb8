use thiserror::Error;

use crate::error::ServiceError;

/// Underlying fault behind a read or write failure.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("xml attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("document has no root element")]
    MissingRoot,

    #[error("document ends before all elements are closed")]
    UnexpectedEof,

    #[error("unexpected element <{found}>, expected {expected}")]
    UnexpectedElement { found: String, expected: &'static str },

    #[error("element <{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("attribute '{attribute}' of <{element}> is not an integer: '{value}'")]
    InvalidNumber {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },

    #[error("document describes an invalid user: {0}")]
    Invalid(#[source] Box<ServiceError>),
}

impl From<ServiceError> for CodecError {
    fn from(err: ServiceError) -> Self {
        CodecError::Invalid(Box::new(err))
    }
}
