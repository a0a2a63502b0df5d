pub mod client;
pub mod generator;
pub mod grader;
#[cfg(test)]
pub mod mock;

use crate::error::{GenerationError, GradingError};
use crate::logger;
use crate::models::{Level, Quiz, Results};
use async_trait::async_trait;

// Public API exports
pub use client::{
    ModelConfig, OpenRouterClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, GENERATION_TEMPERATURE,
    GRADING_TEMPERATURE,
};
pub use generator::{build_generation_prompt, parse_quiz};
pub use grader::{build_grading_prompt, parse_results, validate_answers};

/// The two calls the session makes against the external model.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    async fn generate_quiz(
        &self,
        level: Level,
        prior_questions: &[String],
    ) -> Result<Quiz, GenerationError>;

    async fn grade_and_explain(
        &self,
        quiz: &Quiz,
        answers: &[usize],
        level: Level,
    ) -> Result<Results, GradingError>;
}

/// `ContentGateway` backed by OpenRouter chat completions.
#[derive(Debug)]
pub struct OpenRouterGateway {
    client: OpenRouterClient,
    config: ModelConfig,
}

impl OpenRouterGateway {
    pub fn new(client: OpenRouterClient, config: ModelConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ContentGateway for OpenRouterGateway {
    async fn generate_quiz(
        &self,
        level: Level,
        prior_questions: &[String],
    ) -> Result<Quiz, GenerationError> {
        logger::log(&format!(
            "Generating quiz for {:?} avoiding {} prior questions",
            level,
            prior_questions.len()
        ));
        let prompt = build_generation_prompt(level, prior_questions);
        let response = self
            .client
            .complete(
                generator::GENERATION_SYSTEM_PROMPT,
                &prompt,
                &self.config.with_temperature(GENERATION_TEMPERATURE),
            )
            .await?;
        logger::log(&format!("Raw generation response: {}", response));

        parse_quiz(level, &response)
    }

    async fn grade_and_explain(
        &self,
        quiz: &Quiz,
        answers: &[usize],
        level: Level,
    ) -> Result<Results, GradingError> {
        validate_answers(quiz, answers)?;
        logger::log(&format!("Grading quiz for {:?}: answers {:?}", level, answers));
        let prompt = build_grading_prompt(quiz, answers, level);
        let response = self
            .client
            .complete(
                grader::GRADING_SYSTEM_PROMPT,
                &prompt,
                &self.config.with_temperature(GRADING_TEMPERATURE),
            )
            .await?;
        logger::log(&format!("Raw grading response: {}", response));

        parse_results(quiz, level, &response)
    }
}

/// Strip markdown fences and any prose around the outermost JSON object.
pub(crate) fn clean_json_response(response: &str) -> String {
    let mut cleaned = response.trim().to_string();

    if cleaned.starts_with("```") {
        let lines: Vec<&str> = cleaned.lines().collect();
        if lines.len() > 2 {
            cleaned = lines[1..lines.len() - 1].join("\n");
        }
    }

    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        cleaned = cleaned[start..=end].to_string();
    }

    cleaned.trim().to_string()
}
