use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::metrics::Outcome;
use crate::models::ErrorBody;

// local failures only; upstream-reported errors are relayed as an UpstreamReply
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Configuration Error: {credential} is missing in {platform}.")]
    Configuration { credential: String, platform: String },

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Server Error: {0}")]
    Body(#[from] BytesRejection),

    #[error("Server Error: {0}")]
    Server(String),
}

impl ProxyError {

    pub fn status(&self) -> StatusCode {

        match self {
            ProxyError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            // only an over-cap body keeps its own status, any other read failure is a 500
            ProxyError::Body(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ProxyError::Body(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }

    }

    pub fn outcome(&self) -> Outcome {

        match self {
            ProxyError::Configuration { .. } => Outcome::ConfigMissing,
            ProxyError::MethodNotAllowed => Outcome::MethodRejected,
            ProxyError::Body(_) | ProxyError::Server(_) => Outcome::UnhandledException,
        }

    }

}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Server(err.to_string())
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors carry the request URL, which holds the key
        ProxyError::Server(err.without_url().to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}
