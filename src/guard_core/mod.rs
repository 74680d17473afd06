mod completion;
mod decision;
mod error;
mod moderator;
mod prompt;
mod types;

pub use completion::{Completion, OpenAiCompletion, DEFAULT_API_BASE};
pub use decision::normalize;
pub use error::{GuardError, Result, UpstreamError};
pub use moderator::Moderator;
pub use prompt::{assemble, Policy, GUARDRAIL_MODEL, STORY_GUARDRAIL_PROMPT};
pub use types::{CompletionRequest, Decision, History, Message, Role, Sampling, Turn};
