//! Shared HTTP session
//!
//! One `Session` per client instance: its own `reqwest::Client` with a
//! bounded request timeout, plus the optional exchange recorder. The
//! response handlers centralize status checking and JSON decoding the same
//! way for both backends.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::recorder::{Exchange, ExchangeRecorder};
use crate::ClientOptions;

pub(crate) struct Session {
    client: reqwest::Client,
    recorder: Option<Arc<dyn ExchangeRecorder>>,
}

impl Session {
    /// Build a session from backend options
    ///
    /// `accept_invalid_certs` is set by the direct backend because
    /// controller BMCs serve self-signed TLS.
    pub(crate) fn new(options: &ClientOptions, accept_invalid_certs: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            recorder: options.recorder.clone(),
        })
    }

    /// POST a JSON body and decode a JSON response
    ///
    /// Submission is the only POST in the protocol, so a non-success status
    /// maps to [`ClientError::Submission`].
    pub(crate) async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        self.record("POST", url, serde_json::to_value(body).ok(), status.as_u16(), &text);

        if !status.is_success() {
            return Err(ClientError::submission(status.as_u16(), text));
        }

        decode_body(url, &text)
    }

    /// GET and decode a JSON response
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        self.record("GET", url, None, status.as_u16(), &text);

        if !status.is_success() {
            return Err(ClientError::Protocol(format!(
                "unexpected status {} from {}: {}",
                status, url, text
            )));
        }

        decode_body(url, &text)
    }

    /// DELETE, ignoring the response body
    pub(crate) async fn delete(&self, url: &str) -> Result<()> {
        let response = self.client.delete(url).send().await?;
        let status = response.status();

        self.record("DELETE", url, None, status.as_u16(), "");

        if !status.is_success() {
            return Err(ClientError::Protocol(format!(
                "unexpected status {} deleting {}",
                status, url
            )));
        }

        Ok(())
    }

    fn record(
        &self,
        method: &str,
        url: &str,
        request_body: Option<serde_json::Value>,
        status: u16,
        response_body: &str,
    ) {
        if let Some(recorder) = &self.recorder {
            recorder.record(&Exchange {
                timestamp: Utc::now(),
                method: method.to_string(),
                url: url.to_string(),
                request_body,
                status,
                response_body: response_body.to_string(),
            });
        }
    }
}

fn decode_body<T: DeserializeOwned>(url: &str, text: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|e| ClientError::Protocol(format!("malformed response from {}: {}", url, e)))
}
