//! Advice use cases: prompt → model → shape, with a guaranteed fallback.
//!
//! `Advisor` is the caller-facing surface. Every method returns a valid value
//! of its shape; failures are only visible in logs.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::contract::{
    AgriculturalWeather, ClimateAdvice, DisasterAssessment, HealthAdvice, JobMatch, NutritionPlan,
};
use crate::llm_client::GenerativeModel;

pub mod fallback;
pub mod invoke;
pub mod prompts;

use fallback::{recover, recover_text, with_fallback};
use invoke::{invoke_text, invoke_weather_object};

pub const DEFAULT_WEATHER_LOCATION: &str = "New Delhi";
pub const DEFAULT_FARM_REGION: &str = "Central India";
pub const DEFAULT_BUDGET: &str = "low";

/// Holds the model handle; no per-call state.
#[derive(Clone)]
pub struct Advisor {
    model: Arc<dyn GenerativeModel>,
}

impl Advisor {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn GenerativeModel {
        self.model.as_ref()
    }

    pub async fn get_health_advice(
        &self,
        symptoms: &str,
        age: Option<u32>,
        gender: Option<&str>,
    ) -> HealthAdvice {
        let prompt = prompts::health_prompt(symptoms, age, gender);
        with_fallback(self.model(), "get health advice", &prompt, fallback::health_advice).await
    }

    pub async fn match_job_to_skills(&self, job_description: &str, user_skills: &[String]) -> JobMatch {
        let prompt = prompts::job_match_prompt(job_description, user_skills);
        with_fallback(self.model(), "match job to skills", &prompt, fallback::job_match).await
    }

    /// `budget` defaults to `low`.
    pub async fn get_nutrition_advice(
        &self,
        dietary_preferences: &str,
        health_conditions: Option<&str>,
        budget: Option<&str>,
    ) -> NutritionPlan {
        let prompt = prompts::nutrition_prompt(
            dietary_preferences,
            health_conditions,
            budget.unwrap_or(DEFAULT_BUDGET),
        );
        with_fallback(self.model(), "get nutrition advice", &prompt, fallback::nutrition_plan).await
    }

    pub async fn get_india_weather(&self, location: &str) -> ClimateAdvice {
        let prompt = prompts::india_weather_prompt(location);
        with_fallback(self.model(), "get India weather", &prompt, fallback::climate_advice).await
    }

    pub async fn assess_disaster_preparedness(
        &self,
        disaster_type: &str,
        responses: &Map<String, Value>,
        location: &str,
    ) -> DisasterAssessment {
        let prompt = prompts::disaster_prompt(disaster_type, responses, location);
        with_fallback(
            self.model(),
            "assess disaster preparedness",
            &prompt,
            fallback::disaster_assessment,
        )
        .await
    }

    /// Free-text adaptation advice. `climate_data` is appended when non-empty.
    pub async fn get_climate_advice(&self, location: &str, climate_data: Option<&Value>) -> String {
        let prompt = prompts::climate_advice_prompt(location, climate_data);
        recover_text(
            "get climate advice",
            invoke_text(self.model(), &prompt).await,
            fallback::CLIMATE_ADVICE_EMPTY,
            fallback::CLIMATE_ADVICE_UNAVAILABLE,
        )
    }

    /// Free-form forecast object; the fallback is randomized per call.
    pub async fn get_agricultural_weather(&self, location: &str) -> AgriculturalWeather {
        let prompt = prompts::agricultural_weather_prompt(location);
        let result = invoke_weather_object(self.model(), &prompt).await;
        recover("get agricultural weather", result, || {
            fallback::agricultural_weather(location, &mut rand::thread_rng())
        })
    }

    pub async fn general_chat_response(&self, message: &str, context: &str) -> String {
        let prompt = prompts::chat_prompt(message, context);
        recover_text(
            "generate chat response",
            invoke_text(self.model(), &prompt).await,
            fallback::CHAT_EMPTY,
            fallback::CHAT_UNAVAILABLE,
        )
    }
}
