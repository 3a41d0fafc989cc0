/// HTTP client for the external Judge service.
use async_trait::async_trait;
use serde::Serialize;

use super::{build_client, error_from_status, error_from_transport};
use crate::domain::models::{EndpointConfig, JudgeVerdict, TranscriptTurn};
use crate::domain::ports::{CollaboratorError, Judge, JudgeRequest};

#[derive(Serialize)]
struct EvaluatePayload<'a> {
    transcript: &'a [TranscriptTurn],
    message: &'a str,
}

/// Judge adapter posting to `{base_url}/v1/evaluate`.
///
/// The response body is deserialized loosely into [`JudgeVerdict`]; a
/// body that is not JSON at all is a transport fault
/// (`MalformedResponse`), while JSON with missing or weird score fields
/// is the sanitizer's problem, by contract.
pub struct HttpJudge {
    client: reqwest::Client,
    endpoint: EndpointConfig,
}

impl HttpJudge {
    pub fn new(endpoint: EndpointConfig) -> Self {
        Self {
            client: build_client(&endpoint),
            endpoint,
        }
    }
}

#[async_trait]
impl Judge for HttpJudge {
    async fn evaluate(&self, request: JudgeRequest) -> Result<JudgeVerdict, CollaboratorError> {
        let url = format!("{}/v1/evaluate", self.endpoint.base_url);
        let payload = EvaluatePayload {
            transcript: &request.transcript,
            message: &request.message,
        };

        let mut builder = self.client.post(&url).json(&payload);
        if let Some(key) = &self.endpoint.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| error_from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_status(status, body));
        }

        response
            .json::<JudgeVerdict>()
            .await
            .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))
    }
}
