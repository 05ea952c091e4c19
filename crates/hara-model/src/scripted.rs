//! Deterministic generator double for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ModelError;
use crate::generator::{ChatMessage, ExpectedFormat, TextGenerator};

/// Generator that replays a queue of canned responses in order.
///
/// Each `generate` call pops the next response; an exhausted queue reports
/// `EmptyResponse`, which exercises the pipeline's degradation path.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    model: String,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            model: "scripted".to_string(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _messages: &[ChatMessage],
        _format: ExpectedFormat,
    ) -> Result<String, ModelError> {
        let next = self.responses.lock().ok().and_then(|mut q| q.pop_front());
        next.ok_or_else(|| ModelError::EmptyResponse {
            model: self.model.clone(),
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_then_fails() {
        let generator = ScriptedGenerator::new(["one", "two"]);
        assert_eq!(generator.remaining(), 2);
        let first = generator.generate(&[], ExpectedFormat::Text).await.unwrap();
        assert_eq!(first, "one");
        let second = generator.generate(&[], ExpectedFormat::Text).await.unwrap();
        assert_eq!(second, "two");
        assert!(matches!(
            generator.generate(&[], ExpectedFormat::Text).await,
            Err(ModelError::EmptyResponse { .. })
        ));
    }
}
