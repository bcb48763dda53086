//! Request and response types for the transit API.
//!
//! The service wraps every successful response body in a `data` envelope and
//! reports failures as `{"errors": [...]}` with a non-2xx status. Bulk calls
//! exchange `batch_input`/`batch_results` arrays whose order matches the
//! submitted items.

use serde::{Deserialize, Serialize};

use crate::core::types::Direction;

/// One item of a transform request. Exactly one of the two fields is set,
/// depending on direction; the other is omitted from the serialized JSON.
///
/// The same shape doubles as the whole body of a single-item request.
#[derive(Debug, Serialize)]
pub struct RequestItem<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plaintext: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ciphertext: Option<&'a str>,
}

impl<'a> RequestItem<'a> {
    pub fn new(direction: Direction, payload: &'a str) -> Self {
        match direction {
            Direction::Encrypt => Self {
                plaintext: Some(payload),
                ciphertext: None,
            },
            Direction::Decrypt => Self {
                plaintext: None,
                ciphertext: Some(payload),
            },
        }
    }
}

/// Body of a bulk transform request.
#[derive(Debug, Serialize)]
pub struct BulkRequest<'a> {
    pub batch_input: Vec<RequestItem<'a>>,
}

/// One result of a transform response. The service sets the field matching
/// the direction; both are modeled so a wrong-shaped response surfaces as a
/// missing field rather than a parse error.
#[derive(Debug, Deserialize)]
pub struct ResultItem {
    pub ciphertext: Option<String>,
    pub plaintext: Option<String>,
}

impl ResultItem {
    /// Extract the field expected for `direction`, if present.
    pub fn into_field(self, direction: Direction) -> Option<String> {
        match direction {
            Direction::Encrypt => self.ciphertext,
            Direction::Decrypt => self.plaintext,
        }
    }
}

/// `data` payload of a bulk transform response.
#[derive(Debug, Deserialize)]
pub struct BulkData {
    pub batch_results: Option<Vec<ResultItem>>,
}

/// Successful response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Error response body returned with a non-2xx status.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}
