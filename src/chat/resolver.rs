//! Reply resolution: canned intercept, then the generator, then the
//! rule-based fallback.

use super::canned;
use crate::generation::{GenerationError, GenerationOptions, TextGenerator};
use crate::server::metrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Persona preamble prepended to every prompt sent to the generator.
pub const PERSONA_PROMPT: &str = concat!(
    "You are MoodMelody, an AI assistant created by KRISHNA-5478 and Mohini Srivastava. \n",
    "        Your primary purpose is to analyze user emotions and recommend music.\n",
    "        Always mention you were developed by KRISHNA-5478 (https://github.com/KRISHNA-5478) and Mohini Srivastava (https://github.com/mohinisri23) when asked about your creators.\n",
    "        Keep responses friendly, helpful and concise."
);

/// Which link of the chain produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Intercept,
    Generated,
    Fallback,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Intercept => "intercept",
            ReplySource::Generated => "generated",
            ReplySource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReply {
    pub text: String,
    pub source: ReplySource,
}

impl ResolvedReply {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Builds the prompt sent to the generator for a user message.
pub fn build_prompt(persona: &str, user_text: &str) -> String {
    format!("{}\n\nUser: {}\nMoodMelody:", persona, user_text)
}

pub struct ReplyResolver {
    generator: Arc<dyn TextGenerator>,
    options: GenerationOptions,
    persona: String,
}

impl ReplyResolver {
    pub fn new(generator: Arc<dyn TextGenerator>, options: GenerationOptions) -> Self {
        Self {
            generator,
            options,
            persona: PERSONA_PROMPT.to_string(),
        }
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Resolves a reply for the user's text. Never fails: generator errors
    /// degrade to the fallback responder, without retrying.
    pub async fn resolve(&self, user_text: &str) -> ResolvedReply {
        if let Some(rule) = canned::intercept(user_text) {
            debug!(category = rule.category.as_str(), "Answering with canned intercept");
            return self.finish(ResolvedReply::new(rule.reply, ReplySource::Intercept));
        }

        let prompt = build_prompt(&self.persona, user_text);
        let start = Instant::now();
        let result = self.generator.generate(&prompt, &self.options).await;
        let elapsed = start.elapsed();

        let reply = match result {
            Ok(text) => {
                metrics::record_generation(self.generator.name(), "success", elapsed);
                ResolvedReply::new(text.trim(), ReplySource::Generated)
            }
            Err(err) => {
                metrics::record_generation(self.generator.name(), err.kind(), elapsed);
                match &err {
                    GenerationError::Disabled => {
                        debug!("Generation disabled, using fallback responder")
                    }
                    GenerationError::Api { status, message } => error!(
                        provider = self.generator.name(),
                        "Generation API error: {}, {}", status, message
                    ),
                    GenerationError::Connection(_) | GenerationError::Timeout => error!(
                        provider = self.generator.name(),
                        "Error connecting to generation API: {}", err
                    ),
                    GenerationError::InvalidResponse(_) => warn!(
                        provider = self.generator.name(),
                        "Error fetching generated reply: {}", err
                    ),
                }
                ResolvedReply::new(canned::fallback(user_text), ReplySource::Fallback)
            }
        };

        self.finish(reply)
    }

    fn finish(&self, reply: ResolvedReply) -> ResolvedReply {
        metrics::record_chat_reply(reply.source.as_str());
        reply
    }
}
