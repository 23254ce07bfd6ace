use axum::body::Bytes;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

// {"error": "<message>"} for every local failure
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String
}

// relayed to the caller untouched
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
