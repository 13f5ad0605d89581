//! HTTP-backed implementation of the engine's assistant capability.
//!
//! Talks to a text-completion endpoint: the request is a JSON prompt, the
//! reply free-form text. One attempt per call, no retry; every failure maps
//! to [`AssistError`] and the engine-side sentinel helpers take it from
//! there.

use engine::assist::{Assistant, AssistError, TripDigest, parse_distance_reply};

pub struct HttpAssistant {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAssistant {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    async fn complete(&self, prompt: String) -> Result<String, AssistError> {
        let body = serde_json::json!({ "prompt": prompt }).to_string();

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .body(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| AssistError::Unavailable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(AssistError::Unavailable(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|err| AssistError::Unavailable(err.to_string()))
    }
}

impl Assistant for HttpAssistant {
    async fn estimate_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<f64, AssistError> {
        let prompt = format!(
            "Qual é a distância rodoviária aproximada em KM entre {origin} e {destination} \
             no Brasil? Responda APENAS com o número (ex: 15.5). Não escreva texto."
        );
        let reply = self.complete(prompt).await?;
        parse_distance_reply(&reply)
            .ok_or_else(|| AssistError::Unusable(format!("no number in reply: {reply:?}")))
    }

    async fn analyze(&self, digest: &[TripDigest]) -> Result<String, AssistError> {
        let data = serde_json::to_string_pretty(digest)
            .map_err(|err| AssistError::Unusable(err.to_string()))?;
        let prompt = format!(
            "Analise os dados destas viagens recentes da minha transportadora:\n{data}\n\n\
             Por favor, me dê 3 insights principais sobre onde posso economizar ou \
             aumentar meu lucro."
        );
        self.complete(prompt).await
    }
}
