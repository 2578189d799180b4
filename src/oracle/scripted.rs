use crate::foundation::error::{AtlasError, AtlasResult};
use crate::oracle::Oracle;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Oracle that replays queued responses in call order.
///
/// Used for tests and offline runs. Each call consumes one entry; an `Err` entry simulates a
/// transport failure for that call.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    state: Mutex<ScriptState>,
}

#[derive(Debug, Default)]
struct ScriptState {
    replies: VecDeque<Result<String, String>>,
    prompts: Vec<String>,
}

impl ScriptedOracle {
    /// Create an oracle that answers with `replies`, in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let oracle = Self::default();
        for r in replies {
            oracle.push_reply(r);
        }
        oracle
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, text: impl Into<String>) {
        if let Ok(mut st) = self.state.lock() {
            st.replies.push_back(Ok(text.into()));
        }
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, msg: impl Into<String>) {
        if let Ok(mut st) = self.state.lock() {
            st.replies.push_back(Err(msg.into()));
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|st| st.prompts.clone())
            .unwrap_or_default()
    }

    /// Number of replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.state.lock().map(|st| st.replies.len()).unwrap_or(0)
    }
}

impl Oracle for ScriptedOracle {
    fn query(&self, prompt: &str) -> AtlasResult<String> {
        let mut st = self
            .state
            .lock()
            .map_err(|_| AtlasError::oracle("scripted oracle state poisoned"))?;
        st.prompts.push(prompt.to_string());
        match st.replies.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(AtlasError::oracle(msg)),
            None => Err(AtlasError::oracle("scripted oracle has no replies left")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/oracle/scripted.rs"]
mod tests;
