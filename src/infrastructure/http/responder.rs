/// HTTP client for the external Responder service.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{build_client, error_from_status, error_from_transport};
use crate::domain::models::{CoachingStyle, EndpointConfig, TranscriptTurn};
use crate::domain::ports::{CollaboratorError, Responder, ResponderRequest};

#[derive(Serialize)]
struct ReplyPayload<'a> {
    message: &'a str,
    profile: &'a str,
    persona_id: &'a str,
    style: CoachingStyle,
    history: &'a [TranscriptTurn],
}

#[derive(Deserialize)]
struct ReplyBody {
    reply: String,
}

/// Responder adapter posting to `{base_url}/v1/reply`. Any reply-length
/// convention stated by the behavioral profile is enforced by the
/// generator, not here.
pub struct HttpResponder {
    client: reqwest::Client,
    endpoint: EndpointConfig,
}

impl HttpResponder {
    pub fn new(endpoint: EndpointConfig) -> Self {
        Self {
            client: build_client(&endpoint),
            endpoint,
        }
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn reply(&self, request: ResponderRequest) -> Result<String, CollaboratorError> {
        let url = format!("{}/v1/reply", self.endpoint.base_url);
        let payload = ReplyPayload {
            message: &request.message,
            profile: &request.profile,
            persona_id: &request.persona_id,
            style: request.style,
            history: &request.history,
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
            .json::<ReplyBody>()
            .await
            .map(|body| body.reply)
            .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))
    }
}
