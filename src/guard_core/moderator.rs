use std::sync::Arc;
use std::time::Duration;

use super::completion::Completion;
use super::decision::normalize;
use super::error::UpstreamError;
use super::prompt::{assemble, Policy};
use super::types::{CompletionRequest, Decision, Turn};

/// Answers "may this message through?" for one conversation turn.
///
/// Holds no per-request state, so a single instance is shared by the HTTP
/// endpoint and every chat widget session.
pub struct Moderator {
    completion: Arc<dyn Completion>,
    policy: Policy,
    timeout: Duration,
}

impl Moderator {
    pub fn new(completion: Arc<dyn Completion>, policy: Policy, timeout: Duration) -> Moderator {
        Moderator {
            completion,
            policy,
            timeout,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Makes exactly one completion call. A reply that is not a clean yes/no
    /// becomes [`Decision::No`]; a failed or timed out call is an error.
    pub async fn decide(&self, message: &str, history: &[Turn]) -> Result<Decision, UpstreamError> {
        let request = CompletionRequest {
            model: self.policy.model.clone(),
            messages: assemble(&self.policy.system_prompt, history, message),
            sampling: self.policy.sampling,
        };

        let reply = match tokio::time::timeout(self.timeout, self.completion.complete(&request)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.timeout)),
        };
        let reply = reply.map_err(|err| {
            tracing::warn!(error = %err, history_len = history.len(), "moderation call failed");
            err
        })?;

        let decision = normalize(&reply);
        tracing::info!(
            %decision,
            history_len = history.len(),
            message_len = message.len(),
            "moderation decided"
        );
        Ok(decision)
    }
}
