//! Form state to multipart payload
//!
//! Scalars become one text part, sequences one `key[]` part per element,
//! and image fields a file part plus an `__<key>_exist` flag. Any image
//! whose content cannot be read aborts the whole payload.

use crate::error::SubmissionError;
use crate::schema::FormSchema;
use crate::state::{FieldValue, FormState};
use std::path::Path;

const DEFAULT_FILE_NAME: &str = "image.jpg";
const DEFAULT_MIME: &str = "image/jpeg";

/// Binary content of an image field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Value of one multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FileContent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub key: String,
    pub value: PartValue,
}

/// Ordered list of multipart parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    parts: Vec<PayloadPart>,
}

impl Payload {
    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    /// Text parts as (key, value) pairs, in order
    pub fn text_pairs(&self) -> Vec<(&str, &str)> {
        self.parts
            .iter()
            .filter_map(|part| match &part.value {
                PartValue::Text(text) => Some((part.key.as_str(), text.as_str())),
                PartValue::File(_) => None,
            })
            .collect()
    }

    /// File part for a key
    pub fn file(&self, key: &str) -> Option<&FileContent> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::File(file) if part.key == key => Some(file),
            _ => None,
        })
    }

    fn push_text(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.parts.push(PayloadPart {
            key: key.into(),
            value: PartValue::Text(text.into()),
        });
    }
}

/// Resolves image handles into their content
pub trait ImageSource {
    fn load(&self, handle: &str) -> std::io::Result<FileContent>;
}

/// Reads `file://` URIs and plain paths from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn load(&self, handle: &str) -> std::io::Result<FileContent> {
        let path = Path::new(handle.strip_prefix("file://").unwrap_or(handle));
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let mime = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_MIME.to_string());
        Ok(FileContent {
            file_name,
            mime,
            bytes,
        })
    }
}

/// Key used for each element of a sequence value
pub fn repeated_key(key: &str) -> String {
    format!("{key}[]")
}

/// Companion flag announcing an uploaded image
pub fn exist_flag_key(key: &str) -> String {
    format!("__{key}_exist")
}

/// Serialize the whole state, or fail without producing a payload
pub fn serialize(
    state: &FormState,
    schema: &FormSchema,
    images: &dyn ImageSource,
) -> Result<Payload, SubmissionError> {
    let mut payload = Payload::default();

    for (key, value) in state.iter() {
        if schema.is_excluded(key) {
            tracing::debug!(field = %key, "Skipping excluded field");
            continue;
        }

        if schema.is_image(key) {
            let handle = value
                .as_scalar()
                .filter(|h| !h.trim().is_empty())
                .ok_or_else(|| SubmissionError::MissingImage(key.clone()))?;
            let content = images
                .load(handle)
                .map_err(|source| SubmissionError::ImageUnreadable {
                    field: key.clone(),
                    source,
                })?;
            payload.parts.push(PayloadPart {
                key: key.clone(),
                value: PartValue::File(content),
            });
            payload.push_text(exist_flag_key(key), "true");
            continue;
        }

        match value {
            FieldValue::Scalar(text) => payload.push_text(key.as_str(), text.as_str()),
            FieldValue::Sequence(items) => {
                let repeated = repeated_key(key);
                for item in items {
                    payload.push_text(repeated.as_str(), item.as_str());
                }
            }
        }
    }

    tracing::debug!(parts = payload.parts.len(), "Serialized form payload");
    Ok(payload)
}
