use super::client::LLMClient;
use super::types::{LLMRequest, LLMResponse};
use crate::error::BackendError;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted client for tests and offline runs.
///
/// Responses are queued per model name. Requests without a model override are
/// answered from the queue of the client's default model.
pub struct MockLLMClient {
    responses: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    requests: Mutex<Vec<LLMRequest>>,
    name: String,
    model: String,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub content: String,
    pub error: Option<BackendError>,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            error: None,
            delay: None,
        }
    }

    pub fn error(error: BackendError) -> Self {
        Self {
            content: String::new(),
            error: Some(error),
            delay: None,
        }
    }

    /// Holds the answer back, to force a particular completion order
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self::with_name("MockLLM")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            name: name.into(),
            model: "mock-model".to_string(),
        }
    }

    /// Queues a response for the default model
    pub fn add_response(&self, response: MockResponse) {
        let model = self.model.clone();
        self.add_model_response(model, response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        for response in responses {
            self.add_response(response);
        }
    }

    /// Queues a response for requests that target `model`
    pub fn add_model_response(&self, model: impl Into<String>, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .entry(model.into())
            .or_default()
            .push_back(response);
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().values().map(|q| q.len()).sum()
    }

    /// Requests received so far, in the order they were issued
    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Model names targeted so far, in the order the calls were issued
    pub fn requested_models(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.model.clone().unwrap_or_else(|| self.model.clone()))
            .collect()
    }
}

impl Default for MockLLMClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let model = request.model.clone().unwrap_or_else(|| self.model.clone());
        self.requests.lock().unwrap().push(request);

        let response = self
            .responses
            .lock()
            .unwrap()
            .get_mut(&model)
            .and_then(|queue| queue.pop_front())
            .ok_or_else(|| BackendError::Other {
                message: format!("MockLLMClient: No more responses queued for {}", model),
            })?;

        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = response.error {
            return Err(error);
        }

        let elapsed = response.delay.unwrap_or_default();
        Ok(LLMResponse::text(response.content, elapsed).with_model(model))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model_info(&self) -> Option<String> {
        Some(self.model.clone())
    }
}

impl std::fmt::Debug for MockLLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLLMClient")
            .field("name", &self.name)
            .field("remaining_responses", &self.remaining_responses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_basic() {
        let client = MockLLMClient::new();
        client.add_response(MockResponse::text("Hello!"));

        let response = client.chat(LLMRequest::new(vec![])).await.unwrap();

        assert_eq!(response.content, "Hello!");
        assert_eq!(response.model.as_deref(), Some("mock-model"));
    }

    #[tokio::test]
    async fn test_mock_client_per_model_queues() {
        let client = MockLLMClient::new();
        client.add_model_response("alpha", MockResponse::text("from alpha"));
        client.add_model_response("beta", MockResponse::text("from beta"));

        let beta = client
            .chat(LLMRequest::new(vec![]).with_model("beta"))
            .await
            .unwrap();
        let alpha = client
            .chat(LLMRequest::new(vec![]).with_model("alpha"))
            .await
            .unwrap();

        assert_eq!(beta.content, "from beta");
        assert_eq!(alpha.content, "from alpha");
        assert_eq!(client.requested_models(), vec!["beta", "alpha"]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let client = MockLLMClient::new();
        client.add_response(MockResponse::error(BackendError::TimeoutError {
            seconds: 30,
        }));

        let result = client.chat(LLMRequest::new(vec![])).await;

        assert_eq!(result.unwrap_err(), BackendError::TimeoutError { seconds: 30 });
    }

    #[tokio::test]
    async fn test_mock_client_no_responses() {
        let client = MockLLMClient::new();

        let result = client.chat(LLMRequest::new(vec![])).await;

        assert!(result.is_err());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_multiple_responses() {
        let client = MockLLMClient::new();
        client.add_responses(vec![
            MockResponse::text("First"),
            MockResponse::text("Second"),
            MockResponse::text("Third"),
        ]);

        assert_eq!(client.remaining_responses(), 3);

        let r1 = client.chat(LLMRequest::new(vec![])).await.unwrap();
        assert_eq!(r1.content, "First");

        let r2 = client.chat(LLMRequest::new(vec![])).await.unwrap();
        assert_eq!(r2.content, "Second");

        assert_eq!(client.remaining_responses(), 1);
    }

    #[test]
    fn test_custom_name() {
        let client = MockLLMClient::with_name("TestClient");
        assert_eq!(client.name(), "TestClient");
    }
}
