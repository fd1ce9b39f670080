//! Chat reply resolution.
//!
//! A reply comes from the first link of the chain that answers: a canned
//! intercept, the text generator, or the rule-based fallback responder.

pub mod canned;
mod resolver;
mod suggestion;

pub use resolver::{build_prompt, ReplyResolver, ReplySource, ResolvedReply, PERSONA_PROMPT};
pub use suggestion::{decorate_reply, suggestion_sentence};
