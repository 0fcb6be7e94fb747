use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::wardrobe::{ImportError, RuleBookError, SuggestionError, WardrobeServiceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Rules(RuleBookError),
    Suggestion(SuggestionError),
    Import(ImportError),
    Wardrobe(WardrobeServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Rules(err) => write!(f, "outfit rules error: {}", err),
            AppError::Suggestion(err) => write!(f, "suggestion error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Wardrobe(err) => write!(f, "wardrobe error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Rules(err) => Some(err),
            AppError::Suggestion(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Wardrobe(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_) | AppError::Wardrobe(_) => StatusCode::BAD_REQUEST,
            AppError::Suggestion(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Rules(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RuleBookError> for AppError {
    fn from(value: RuleBookError) -> Self {
        Self::Rules(value)
    }
}

impl From<SuggestionError> for AppError {
    fn from(value: SuggestionError) -> Self {
        Self::Suggestion(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<WardrobeServiceError> for AppError {
    fn from(value: WardrobeServiceError) -> Self {
        Self::Wardrobe(value)
    }
}
