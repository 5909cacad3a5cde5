//! HTTP error responses for web adapter.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::CardError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<CardError> for WebError {
    fn from(err: CardError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let template = super::templates::ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        (self.status, Html(template.fragment())).into_response()
    }
}

pub fn status_from_error(err: &CardError) -> StatusCode {
    match err {
        CardError::ConfigMissing { .. }
        | CardError::ConfigInvalid { .. }
        | CardError::ConfigParse { .. }
        | CardError::InvalidBoard { .. } => StatusCode::BAD_REQUEST,
        CardError::UnknownTicker { .. } => StatusCode::NOT_FOUND,
        CardError::Catalogue { .. } | CardError::Render { .. } | CardError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
