//! Free-text guidance built on the chat use case.
//!
//! Each request type knows its required inputs, its prompt, and the chat
//! context label it is sent under. Only missing caller input is an error;
//! model failures fall back like any chat reply.

use serde_json::{Map, Value};

use crate::advice::Advisor;
use crate::errors::MissingInput;

pub mod prompts;

use prompts::fill;

/// A prompt-producing guidance request.
pub trait GuidanceRequest {
    /// Context label passed alongside the message.
    const CONTEXT: &'static str;

    fn validate(&self) -> Result<(), MissingInput>;

    fn message(&self) -> String;
}

fn require(value: &str, name: &'static str) -> Result<(), MissingInput> {
    if value.trim().is_empty() {
        Err(MissingInput(name))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AgriculturalQuestion {
    pub message: String,
}

impl GuidanceRequest for AgriculturalQuestion {
    const CONTEXT: &'static str = prompts::AGRICULTURE_CONTEXT;

    fn validate(&self) -> Result<(), MissingInput> {
        require(&self.message, "message")
    }

    fn message(&self) -> String {
        fill(prompts::AGRICULTURE_TEMPLATE, &[("message", &self.message)])
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaterManagementPlan {
    pub crop: String,
    pub soil_type: String,
    /// Acres, as entered.
    pub field_size: String,
    pub season: String,
    pub location: String,
}

impl GuidanceRequest for WaterManagementPlan {
    const CONTEXT: &'static str = prompts::WATER_CONTEXT;

    fn validate(&self) -> Result<(), MissingInput> {
        require(&self.crop, "crop")?;
        require(&self.soil_type, "soil_type")?;
        require(&self.field_size, "field_size")
    }

    fn message(&self) -> String {
        fill(
            prompts::WATER_TEMPLATE,
            &[
                ("crop", &self.crop),
                ("soil_type", &self.soil_type),
                ("field_size", &self.field_size),
                ("season", &self.season),
                ("location", &self.location),
            ],
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct CareerPlan {
    pub career_goal: String,
    pub current_level: String,
    pub timeframe: String,
    pub current_skills: String,
}

impl GuidanceRequest for CareerPlan {
    const CONTEXT: &'static str = prompts::CAREER_CONTEXT;

    fn validate(&self) -> Result<(), MissingInput> {
        require(&self.career_goal, "career_goal")?;
        require(&self.current_level, "current_level")
    }

    fn message(&self) -> String {
        fill(
            prompts::CAREER_TEMPLATE,
            &[
                ("career_goal", &self.career_goal),
                ("current_level", &self.current_level),
                ("timeframe", &self.timeframe),
                ("current_skills", &self.current_skills),
            ],
        )
    }
}

#[derive(Debug, Clone)]
pub struct SkillAssessment {
    pub skill_area: String,
    pub responses: Map<String, Value>,
}

impl SkillAssessment {
    /// Assessment in the `general` skill area.
    pub fn general(responses: Map<String, Value>) -> Self {
        Self {
            skill_area: "general".to_string(),
            responses,
        }
    }
}

impl GuidanceRequest for SkillAssessment {
    const CONTEXT: &'static str = prompts::SKILL_ASSESSMENT_CONTEXT;

    fn validate(&self) -> Result<(), MissingInput> {
        if self.responses.is_empty() {
            return Err(MissingInput("responses"));
        }
        Ok(())
    }

    fn message(&self) -> String {
        let responses = Value::Object(self.responses.clone()).to_string();
        fill(
            prompts::SKILL_ASSESSMENT_TEMPLATE,
            &[("skill_area", &self.skill_area), ("responses", &responses)],
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct LearningFeedback {
    pub topic: String,
    pub answer: String,
}

impl GuidanceRequest for LearningFeedback {
    const CONTEXT: &'static str = prompts::LEARNING_FEEDBACK_CONTEXT;

    fn validate(&self) -> Result<(), MissingInput> {
        require(&self.answer, "answer")
    }

    fn message(&self) -> String {
        fill(
            prompts::LEARNING_FEEDBACK_TEMPLATE,
            &[("topic", &self.topic), ("answer", &self.answer)],
        )
    }
}

#[derive(Debug, Clone)]
pub struct SchemeSearch {
    pub query: String,
    pub farming_type: String,
    pub location: String,
    pub language: String,
}

impl SchemeSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            farming_type: String::new(),
            location: String::new(),
            language: "English".to_string(),
        }
    }
}

impl GuidanceRequest for SchemeSearch {
    const CONTEXT: &'static str = prompts::SCHEMES_CONTEXT;

    fn validate(&self) -> Result<(), MissingInput> {
        require(&self.query, "query")
    }

    fn message(&self) -> String {
        fill(
            prompts::SCHEMES_TEMPLATE,
            &[
                ("query", &self.query),
                ("farming_type", &self.farming_type),
                ("location", &self.location),
                ("language", &self.language),
            ],
        )
    }
}

impl Advisor {
    /// Validates the request, then sends it through the chat use case.
    pub async fn guidance<R: GuidanceRequest + Sync>(&self, request: &R) -> Result<String, MissingInput> {
        request.validate()?;
        Ok(self
            .general_chat_response(&request.message(), R::CONTEXT)
            .await)
    }
}
