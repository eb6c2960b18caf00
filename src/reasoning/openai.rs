//! OpenAI chat-completions backed reasoning service
//!
//! Each of the four operations is a single prompted completion. There is no
//! retry or backoff here: a failed call unwinds the agent run.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ModelSettings;

use super::{ReasoningError, ReasoningService, TaskAnalysis, TaskContext};

const INITIAL_TASKS_PROMPT: &str = "You are an autonomous task-creation agent. Given an overall \
     objective, create a short list of concrete tasks that together accomplish it. \
     Respond with ONLY a JSON array of task strings, for example: \
     [\"research existing solutions\", \"draft an outline\"]";

const ANALYZE_PROMPT: &str = "You are an autonomous task-analysis agent working towards an overall \
     objective. Think through how to best accomplish the given task and explain \
     your approach. Respond with ONLY a JSON object of the form \
     {\"reasoning\": \"...\"}";

const EXECUTE_PROMPT: &str = "You are an autonomous task-execution agent working towards an overall \
     objective. Perform the given task as well as possible using the provided \
     reasoning, and respond with the result as plain text.";

const ADDITIONAL_TASKS_PROMPT: &str = "You are an autonomous task-creation agent working towards an overall \
     objective. Given the task that just completed, its result, the tasks still \
     queued, and the tasks already completed, propose any NEW tasks required to \
     reach the objective. Do not repeat queued or completed tasks. Respond with \
     ONLY a JSON array of task strings; respond with [] if nothing is needed.";

/// Reasoning service speaking to an OpenAI-compatible chat completions API
pub struct OpenAiService {
    goal: String,
    model: String,
    api_key: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
    http: Client,
}

impl OpenAiService {
    /// Create a service for one goal from model settings
    ///
    /// The API key is taken from the settings directly or, failing that, from
    /// the environment variable the settings name.
    pub fn from_settings(goal: &str, settings: &ModelSettings) -> Result<Self, ReasoningError> {
        let api_key = settings.resolve_api_key().map_err(ReasoningError::Config)?;

        let http = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(ReasoningError::Network)?;

        Ok(Self {
            goal: goal.to_string(),
            model: settings.model.clone(),
            api_key,
            base_url: settings.base_url.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            http,
        })
    }

    /// Send one chat completion and return the assistant text
    async fn chat(&self, system: &str, user: &str) -> Result<String, ReasoningError> {
        debug!(model = %self.model, user_len = user.len(), "chat: sending completion request");
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status, "chat: API error");
            return Err(ReasoningError::Api { status, message });
        }

        let api_response: ChatResponse = response.json().await?;
        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| ReasoningError::InvalidResponse("completion had no content".to_string()))
    }
}

#[async_trait]
impl ReasoningService for OpenAiService {
    async fn initial_tasks(&self) -> Result<Vec<String>, ReasoningError> {
        let user = format!("Objective: {}", self.goal);
        let text = self.chat(INITIAL_TASKS_PROMPT, &user).await?;
        parse_string_array(&text)
    }

    async fn analyze_task(&self, task: &str) -> Result<TaskAnalysis, ReasoningError> {
        let user = format!("Objective: {}\nTask: {}", self.goal, task);
        let text = self.chat(ANALYZE_PROMPT, &user).await?;

        // Models do not always honor the JSON shape; free text is still a
        // usable reasoning narrative.
        match serde_json::from_str::<TaskAnalysis>(extract_json(&text)) {
            Ok(analysis) => Ok(analysis),
            Err(e) => {
                debug!(error = %e, "analyze_task: falling back to raw text reasoning");
                Ok(TaskAnalysis { reasoning: text })
            }
        }
    }

    async fn execute_task(&self, task: &str, analysis: &TaskAnalysis) -> Result<String, ReasoningError> {
        let user = format!(
            "Objective: {}\nTask: {}\nReasoning: {}",
            self.goal, task, analysis.reasoning
        );
        self.chat(EXECUTE_PROMPT, &user).await
    }

    async fn additional_tasks(
        &self,
        context: &TaskContext,
        last_result: &str,
    ) -> Result<Vec<String>, ReasoningError> {
        let user = format!(
            "Objective: {}\nCompleted task: {}\nResult: {}\nQueued tasks: {}\nCompleted tasks: {}",
            self.goal,
            context.current,
            last_result,
            context.remaining.join("; "),
            context.completed.join("; "),
        );
        let text = self.chat(ADDITIONAL_TASKS_PROMPT, &user).await?;

        // An unparseable proposal list only stops further decomposition; it
        // should not kill the run.
        match parse_string_array(&text) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                warn!(error = %e, "additional_tasks: unparseable proposal list, continuing without");
                Ok(Vec::new())
            }
        }
    }
}

/// Strip a markdown code fence if the model wrapped its JSON in one
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse a JSON array of strings, tolerating surrounding prose
fn parse_string_array(text: &str) -> Result<Vec<String>, ReasoningError> {
    let candidate = extract_json(text);

    if let Ok(tasks) = serde_json::from_str::<Vec<String>>(candidate) {
        return Ok(tasks);
    }

    // Second chance: the outermost bracketed slice of the text
    if let (Some(start), Some(end)) = (candidate.find('['), candidate.rfind(']'))
        && start < end
        && let Ok(tasks) = serde_json::from_str::<Vec<String>>(&candidate[start..=end])
    {
        return Ok(tasks);
    }

    Err(ReasoningError::InvalidResponse(format!(
        "expected a JSON array of task strings, got: {}",
        text.chars().take(200).collect::<String>()
    )))
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_passes_plain_text_through() {
        assert_eq!(extract_json("[\"a\"]"), "[\"a\"]");
    }

    #[test]
    fn test_extract_json_strips_fences() {
        assert_eq!(extract_json("```json\n[\"a\", \"b\"]\n```"), "[\"a\", \"b\"]");
        assert_eq!(extract_json("```\n{\"reasoning\": \"x\"}\n```"), "{\"reasoning\": \"x\"}");
    }

    #[test]
    fn test_parse_string_array_plain() {
        let tasks = parse_string_array("[\"one\", \"two\"]").unwrap();
        assert_eq!(tasks, vec!["one", "two"]);
    }

    #[test]
    fn test_parse_string_array_with_prose() {
        let tasks = parse_string_array("Here are the tasks:\n[\"one\", \"two\"]\nGood luck!").unwrap();
        assert_eq!(tasks, vec!["one", "two"]);
    }

    #[test]
    fn test_parse_string_array_rejects_garbage() {
        assert!(parse_string_array("no tasks here").is_err());
    }

    #[test]
    fn test_parse_chat_response() {
        let json = r#"{
            "choices": [
                { "message": { "content": "hello" }, "finish_reason": "stop" }
            ],
            "usage": { "prompt_tokens": 10, "completion_tokens": 2 }
        }"#;

        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hello"));
    }
}
