use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Rejected user input. The message is safe to show verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' field is expected")]
    Missing(&'static str),
    #[error("'{0}' field file must be a valid image")]
    NotAnImage(&'static str),
}

impl ValidationError {
    /// Label of the form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing(field) | ValidationError::NotAnImage(field) => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("employee '{0}' does not exist")]
    NotFound(String),
    #[error("{context}. Details: '{source}'")]
    Unavailable {
        context: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("invalid stored employee data: {0}")]
    InvalidData(String),
}

impl StoreError {
    pub fn unavailable(context: &'static str, source: impl Into<BoxError>) -> Self {
        StoreError::Unavailable {
            context,
            source: source.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("object '{0}' does not exist")]
    NotFound(String),
    #[error("{context}. Details: '{source}'")]
    Unavailable {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl BlobError {
    pub fn unavailable(context: &'static str, source: impl Into<BoxError>) -> Self {
        BlobError::Unavailable {
            context,
            source: source.into(),
        }
    }
}

pub type BlobResult<T> = Result<T, BlobError>;

/// Image decode or encode failure while building the thumbnail.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("'Picture' field could not be decoded as an image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("'Picture' field could not be encoded: {0}")]
    Encode(#[source] image::ImageError),
}

/// Failure of one stage of the save pipeline. Earlier stages are not rolled back.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("form failed validate: {0}")]
    Validation(#[from] ValidationError),
    #[error("error to resize image: {0}")]
    Processing(#[from] ImageError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Blob(#[from] BlobError),
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    DatabaseError(String),
    AWSError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::AWSError(msg) => write!(f, "AWS Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::DatabaseError(_) | AppError::AWSError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::DatabaseError(msg)
            | AppError::AWSError(msg) => msg.clone(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error })
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::NotFound(err.to_string()),
            StoreError::Unavailable { .. } | StoreError::InvalidData(_) => {
                AppError::DatabaseError(err.to_string())
            }
        }
    }
}

impl From<BlobError> for AppError {
    fn from(err: BlobError) -> Self {
        AppError::AWSError(err.to_string())
    }
}

impl From<SaveError> for AppError {
    fn from(err: SaveError) -> Self {
        match err {
            SaveError::Validation(_) | SaveError::Processing(_) => AppError::BadRequest(err.to_string()),
            SaveError::Store(err) => err.into(),
            SaveError::Blob(err) => err.into(),
        }
    }
}
