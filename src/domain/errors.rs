use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Phone number is required")]
    MissingPhone,
    #[error("Invalid phone number: expected 10 to 15 digits, got {digits}")]
    InvalidPhone { digits: usize },
    #[error("Invalid coordinate {field}: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
    #[error("Invalid video url: {0}")]
    InvalidVideoUrl(String),
}
