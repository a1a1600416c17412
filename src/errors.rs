use axum::http::StatusCode;
use thiserror::Error;

/// Failures raised by the tracking core and the document store.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrackError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable(message.into())
    }
}

pub type TrackResult<T> = Result<T, TrackError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackError> for AppError {
    fn from(err: TrackError) -> Self {
        match err {
            TrackError::InvalidInput(msg) => Self::bad_request(msg),
            TrackError::DataUnavailable(msg) => Self::not_found(msg),
            other => {
                tracing::error!(error = %other, "store failure");
                Self::internal(other)
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_errors_map_to_status_codes() {
        let invalid: AppError = TrackError::invalid("bad date").into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, "bad date");

        let missing: AppError = TrackError::unavailable("no profile").into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let io: AppError = TrackError::from(std::io::Error::other("disk full")).into();
        assert_eq!(io.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
