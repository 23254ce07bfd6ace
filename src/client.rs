use reqwest::{Client, Url};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::error::ProxyError;
use crate::models::UpstreamReply;

pub async fn call_upstream(
    client: &Client,
    upstream_url: &str,
    api_key: &str,
    payload: &Value
) -> Result<UpstreamReply, ProxyError> {

    let url = Url::parse_with_params(upstream_url, &[("key", api_key)])
        .map_err(|e| ProxyError::Server(format!("invalid upstream URL: {}", e)))?;

    // .json() sets Content-Type: application/json
    let response = client
        .post(url)
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    let body = response.bytes().await?;

    // relayed byte-for-byte, but it still has to be JSON
    serde_json::from_slice::<IgnoredAny>(&body)?;

    Ok(UpstreamReply { status, body })

}
