use crate::translator::Kind;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TranslateError {
    #[error("Unsupported type {kind} for parameter {id}")]
    UnsupportedType { id: String, kind: String },
    #[error("Unsupported operation: {kind} options do not have a default value")]
    UnsupportedOperation { kind: Kind },
}

impl TranslateError {
    pub fn new_unsupported_type<T: Into<String>>(id: &str, kind: T) -> Self {
        TranslateError::UnsupportedType {
            id: id.to_string(),
            kind: kind.into(),
        }
    }
}
