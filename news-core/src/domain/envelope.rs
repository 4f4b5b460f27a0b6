use serde::Serialize;

use crate::domain::error::{DomainError, ErrorKind};

const FALLBACK_ERROR: &str = "An error occurred";

/// Uniform `{success, data, error}` response. `kind` is kept for Rust
/// callers that need to branch and is not serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip)]
    pub kind: Option<ErrorKind>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    pub fn failed(err: &DomainError) -> Self {
        let message = err.to_string();
        Self {
            success: false,
            data: None,
            error: Some(if message.is_empty() {
                FALLBACK_ERROR.to_string()
            } else {
                message
            }),
            kind: Some(err.kind()),
        }
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == Some(kind)
    }

    /// Returns the data on success, otherwise the reported message if any.
    pub fn into_result(self) -> Result<T, Option<String>> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(self.error),
        }
    }
}

impl<T> From<Result<T, DomainError>> for Envelope<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(data) => Envelope::ok(data),
            Err(err) => Envelope::failed(&err),
        }
    }
}
