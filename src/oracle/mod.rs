//! Oracle boundary.
//!
//! The oracle is an untrusted free-text responder. Everything it returns is parsed defensively by
//! the `acquire` stage; nothing here interprets the text.

/// Environment-sourced configuration for the live oracle.
pub mod config;
/// Blocking chat-completion oracle.
pub mod openai;
/// Prompt texts sent to the oracle.
pub mod prompt;
/// In-memory oracle that replays canned responses.
pub mod scripted;

use crate::foundation::error::AtlasResult;

/// A natural-language question answering service.
///
/// Implementations perform one blocking request per call, with no retry.
pub trait Oracle {
    /// Send `prompt` and return the raw response text.
    fn query(&self, prompt: &str) -> AtlasResult<String>;
}

impl<T: Oracle + ?Sized> Oracle for &T {
    fn query(&self, prompt: &str) -> AtlasResult<String> {
        (**self).query(prompt)
    }
}

impl<T: Oracle + ?Sized> Oracle for Box<T> {
    fn query(&self, prompt: &str) -> AtlasResult<String> {
        (**self).query(prompt)
    }
}
