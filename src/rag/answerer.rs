//! Answer generation backed by a chat model.

use super::AnswerGenerator;
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::ChatModel;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Default sampling temperature for answers.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// [`AnswerGenerator`] that renders the answer prompts and calls a [`ChatModel`].
pub struct ChatAnswerer {
    model: Arc<dyn ChatModel>,
    prompts: Prompts,
    temperature: f32,
}

impl ChatAnswerer {
    /// Create an answerer with default prompts.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            prompts: Prompts::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl AnswerGenerator for ChatAnswerer {
    async fn generate(&self, context: &str, question: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_string());
        vars.insert("question".to_string(), question.to_string());

        let system_prompt = self
            .prompts
            .render_with_custom(&self.prompts.answer.system, &HashMap::new());
        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.answer.user, &vars);

        debug!("Asking {} with {} characters of context", self.model.model(), context.len());

        self.model
            .complete(&system_prompt, &user_prompt, self.temperature)
            .await
    }
}
