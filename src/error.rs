//! Error types for the form engine

use thiserror::Error;

/// Problems found in the schema returned by the member service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two active descriptors share a name
    #[error("Duplicate field name in schema: {0}")]
    DuplicateField(String),

    /// A choice field points at an option set that does not exist
    #[error("No option set for field '{field}' (extended index {index})")]
    OptionSetNotFound { field: String, index: i64 },

    /// A choice field carries no extended index at all
    #[error("Field '{0}' has no extended index")]
    MissingExtendedIndex(String),
}

/// Rejected edits to a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The field is not part of the active schema
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The edit does not fit the variant resolved for the field
    #[error("Edit '{edit}' does not apply to {variant} field '{field}'")]
    EditMismatch {
        field: String,
        variant: &'static str,
        edit: &'static str,
    },

    /// Phone segment index outside 0..3
    #[error("Phone segment {0} out of range")]
    SegmentOutOfRange(usize),

    /// A choice value that is not in the field's vocabulary
    #[error("'{value}' is not an option of field '{field}'")]
    NotAnOption { field: String, value: String },

    /// The image picker produced no usable resource handle
    #[error("No image selected for field '{0}'")]
    NoImageHandle(String),

    /// The choice field could not be resolved against the schema
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Failures while building the submission payload
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// An image field holds no usable handle
    #[error("Image field '{0}' has no content handle")]
    MissingImage(String),

    /// An image handle could not be read
    #[error("Failed to read image for field '{field}': {source}")]
    ImageUnreadable {
        field: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures talking to the member service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Network or HTTP client failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Service error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// The fetched schema failed validation
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Edit flows need login credentials
    #[error("Missing credentials for profile edit")]
    MissingCredentials,
}

/// Top-level error for form sessions
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub type FormResult<T> = std::result::Result<T, FormError>;
