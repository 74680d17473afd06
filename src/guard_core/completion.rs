use std::time::Duration;

use async_openai::{config::OpenAIConfig, error::OpenAIError, types as openai_types, Client};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;

use super::error::UpstreamError;
use super::types::{CompletionRequest, Message, Role};

type Model = openai_types::CreateChatCompletionRequest;
type ModelArgs = openai_types::CreateChatCompletionRequestArgs;
type OpenAiMessage = openai_types::ChatCompletionRequestMessage;
type MessageArgs = openai_types::ChatCompletionRequestMessageArgs;

pub static DEFAULT_API_BASE: &str = "https://api.x.ai/v1";

/// One text-generation round trip to a chat completion backend.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Returns the text of the first candidate.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamError>;
}

/// Chat completion over any OpenAI-compatible endpoint (xAI by default).
pub struct OpenAiCompletion {
    client: Client<OpenAIConfig>,
}

impl OpenAiCompletion {
    pub fn new(api_key: &str, api_base: &str) -> OpenAiCompletion {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        // The client retries rate-limited calls by default; a zero budget
        // leaves exactly one attempt per request.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        OpenAiCompletion {
            client: Client::with_config(config).with_backoff(no_retry),
        }
    }
}

#[async_trait]
impl Completion for OpenAiCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamError> {
        let model = build_model(request)?;
        tracing::debug!(
            model = %request.model,
            message_count = request.messages.len(),
            "sending chat completion request"
        );

        let response = self.client.chat().create(model).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::MalformedResponse("no choices returned".into()))?;
        choice
            .message
            .content
            .ok_or_else(|| UpstreamError::MalformedResponse("first choice has no content".into()))
    }
}

fn build_model(request: &CompletionRequest) -> Result<Model, OpenAIError> {
    let messages = request
        .messages
        .iter()
        .map(build_message)
        .collect::<Result<Vec<_>, _>>()?;
    let sampling = &request.sampling;

    ModelArgs::default()
        .model(request.model.as_str())
        .messages(messages)
        .temperature(sampling.temperature)
        .max_tokens(sampling.max_tokens)
        .top_p(sampling.top_p)
        .frequency_penalty(sampling.frequency_penalty)
        .presence_penalty(sampling.presence_penalty)
        .build()
}

fn build_message(message: &Message) -> Result<OpenAiMessage, OpenAIError> {
    let role = match message.role {
        Role::System => openai_types::Role::System,
        Role::User => openai_types::Role::User,
        Role::Assistant => openai_types::Role::Assistant,
    };
    MessageArgs::default()
        .role(role)
        .content(message.content.as_str())
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::guard_core::prompt::Policy;
    use crate::guard_core::types::Sampling;
    use crate::guard_core::Moderator;

    /// Serves `429 Too Many Requests` to everything and counts the requests.
    async fn rate_limited_server() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let counter = counter.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 4096];
                    loop {
                        let n = match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => n,
                        };
                        buf.extend_from_slice(&chunk[..n]);
                        let text = String::from_utf8_lossy(&buf);
                        let Some(head_end) = text.find("\r\n\r\n") else {
                            continue;
                        };
                        let length = text[..head_end]
                            .lines()
                            .find_map(|line| {
                                let (name, value) = line.split_once(':')?;
                                name.eq_ignore_ascii_case("content-length")
                                    .then(|| value.trim().parse::<usize>().ok())?
                            })
                            .unwrap_or(0);
                        if buf.len() >= head_end + 4 + length {
                            break;
                        }
                    }

                    counter.fetch_add(1, Ordering::SeqCst);
                    let body = r#"{"error":{"message":"Rate limit reached","type":"rate_limit_exceeded","param":null,"code":null}}"#;
                    let response = format!(
                        "HTTP/1.1 429 Too Many Requests\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{addr}/v1"), hits)
    }

    #[tokio::test]
    async fn rate_limit_is_reported_after_one_call() {
        let (api_base, hits) = rate_limited_server().await;
        let completion = Arc::new(OpenAiCompletion::new("xai-test", &api_base));
        let moderator = Moderator::new(completion, Policy::default(), Duration::from_secs(3));

        let err = moderator.decide("What is IPFI?", &[]).await.unwrap_err();

        assert!(
            matches!(err, UpstreamError::Transport(ref msg) if msg.contains("Rate limit reached")),
            "{err:?}"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    fn close(value: &serde_json::Value, expected: f64) -> bool {
        (value.as_f64().unwrap() - expected).abs() < 1e-6
    }

    #[test]
    fn model_carries_fixed_sampling() {
        let request = CompletionRequest {
            model: "grok-2-latest".into(),
            messages: vec![
                Message::system("sys"),
                Message::user("hi"),
                Message::assistant("Yes"),
                Message::user("bye"),
            ],
            sampling: Sampling::GUARDRAIL,
        };
        let json = serde_json::to_value(build_model(&request).unwrap()).unwrap();

        assert_eq!(json["model"], "grok-2-latest");
        assert_eq!(json["max_tokens"], 10);
        assert!(close(&json["temperature"], 0.1));
        assert!(close(&json["top_p"], 0.95));
        assert!(close(&json["frequency_penalty"], 0.0));
        assert!(close(&json["presence_penalty"], 0.0));

        let messages = json["messages"].as_array().unwrap();
        let pairs: Vec<(&str, &str)> = messages
            .iter()
            .map(|m| (m["role"].as_str().unwrap(), m["content"].as_str().unwrap()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("system", "sys"),
                ("user", "hi"),
                ("assistant", "Yes"),
                ("user", "bye")
            ]
        );
    }
}
