use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

use crate::client::call_upstream;
use crate::config::Config;
use crate::error::ProxyError;
use crate::metrics::{MetricsSnapshot, Outcome};
use crate::models::UpstreamReply;
use crate::AppState;

pub async fn health_check() -> &'static str {

    "OK"

}

pub async fn metrics_snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {

    Json(state.metrics.snapshot())

}

// checks run in a fixed order: key, then method, then body
pub async fn forward(
    config: &Config,
    client: &Client,
    method: &Method,
    body: Result<Bytes, BytesRejection>
) -> Result<UpstreamReply, ProxyError> {

    let api_key = config.api_key.as_deref().ok_or_else(|| ProxyError::Configuration {
        credential: config.credential_name.clone(),
        platform: config.platform.clone(),
    })?;

    if *method != Method::POST {
        return Err(ProxyError::MethodNotAllowed);
    }

    let body = body?;
    let payload: Value = serde_json::from_slice(&body)?;

    call_upstream(client, &config.upstream_url, api_key, &payload).await

}

fn relay(reply: UpstreamReply) -> Response {

    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body
    ).into_response()

}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4(), method = %method))]
pub async fn generate_handler(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>
) -> Response {

    match forward(&state.config, &state.http_client, &method, body).await {
        Ok(reply) => {
            state.metrics.record(Outcome::UpstreamRelayed);
            if reply.is_success() {
                tracing::info!(status = reply.status.as_u16(), bytes = reply.body.len(), "relayed upstream reply");
            } else {
                state.metrics.record_upstream_error();
                tracing::warn!(status = reply.status.as_u16(), bytes = reply.body.len(), "relayed upstream error");
            }
            relay(reply)
        }
        Err(err) => {
            let outcome = err.outcome();
            state.metrics.record(outcome);
            match outcome {
                Outcome::UnhandledException => tracing::error!(outcome = outcome.as_str(), error = %err, "forward failed"),
                _ => tracing::warn!(outcome = outcome.as_str(), error = %err, "request rejected"),
            }
            err.into_response()
        }
    }

}
