//! Fallback Policy: every use case gets a valid value, whatever the endpoint does.
//!
//! Single attempt per call. On `EndpointError`, `EmptyResponse` or `ParseError`
//! the failure is logged and the use case's predefined value is returned.

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Map, Value};
use tracing::{error, warn};

use super::invoke::invoke_shape;
use crate::contract::{
    AgriculturalWeather, ClimateAdvice, DisasterAssessment, HealthAdvice, JobMatch, NutritionPlan,
    Shape,
};
use crate::errors::{AdviceError, FailureKind};
use crate::llm_client::prompts::Prompt;
use crate::llm_client::GenerativeModel;

pub const CLIMATE_ADVICE_EMPTY: &str = "Unable to provide climate advice at this time.";
pub const CLIMATE_ADVICE_UNAVAILABLE: &str = "Please check back later for climate recommendations.";
pub const CHAT_EMPTY: &str = "I'm here to help! Could you please rephrase your question?";
pub const CHAT_UNAVAILABLE: &str = "I'm having trouble responding right now. Please try again.";

/// Candidate temperatures (°C) for the randomized weather fallback.
pub const FALLBACK_TEMPS: [i64; 5] = [26, 28, 30, 32, 35];
pub const FALLBACK_CONDITIONS: [&str; 4] = ["Sunny", "Partly Cloudy", "Cloudy", "Light Rain"];

/// Recovery boundary: unwraps `result` or logs and substitutes `fallback()`.
pub fn recover<T>(
    use_case: &str,
    result: Result<T, AdviceError>,
    fallback: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!(failure = %e.kind(), "Failed to {use_case}: {e}");
            fallback()
        }
    }
}

/// Text variant: an empty reply and a hard failure get different messages.
/// Empty replies are logged at `warn`, everything else at `error`.
pub fn recover_text(
    use_case: &str,
    result: Result<String, AdviceError>,
    on_empty: &str,
    on_failure: &str,
) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            if e.kind() == FailureKind::EmptyResponse {
                warn!(failure = %e.kind(), "Failed to {use_case}: {e}");
            } else {
                error!(failure = %e.kind(), "Failed to {use_case}: {e}");
            }
            fallback_text(&e, on_empty, on_failure)
        }
    }
}

/// Picks the text-use-case message for `error` without logging it.
pub fn fallback_text(error: &AdviceError, on_empty: &str, on_failure: &str) -> String {
    match error.kind() {
        FailureKind::EmptyResponse => on_empty.to_string(),
        FailureKind::Endpoint | FailureKind::Parse => on_failure.to_string(),
    }
}

/// Invoke-with-fallback for any typed shape.
pub async fn with_fallback<T: Shape>(
    model: &dyn GenerativeModel,
    use_case: &str,
    prompt: &Prompt,
    fallback: impl FnOnce() -> T,
) -> T {
    recover(use_case, invoke_shape::<T>(model, prompt).await, fallback)
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback instances
// ────────────────────────────────────────────────────────────────────────────

pub fn health_advice() -> HealthAdvice {
    HealthAdvice {
        advice: "Please consult with a healthcare professional for personalized advice.".to_string(),
        urgency_level: "medium".to_string(),
        recommended_actions: vec!["Seek professional medical consultation".to_string()],
    }
}

pub fn job_match() -> JobMatch {
    JobMatch {
        match_score: 0.0,
        reasons: vec!["Unable to analyze at this time".to_string()],
        skill_gaps: vec!["Analysis unavailable".to_string()],
        recommendations: vec!["Please try again later".to_string()],
    }
}

pub fn nutrition_plan() -> NutritionPlan {
    NutritionPlan {
        daily_calories: 2000,
        meal_suggestions: vec!["Balanced meals with available local ingredients".to_string()],
        nutritional_tips: vec!["Consult with a nutritionist for personalized advice".to_string()],
        warnings: vec!["Please seek professional guidance for specific dietary needs".to_string()],
    }
}

pub fn climate_advice() -> ClimateAdvice {
    ClimateAdvice {
        current_conditions: "Weather data temporarily unavailable".to_string(),
        temperature: "N/A".to_string(),
        humidity: "N/A".to_string(),
        recommendations: vec!["Please check back later for weather updates".to_string()],
        warnings: vec!["Unable to fetch current weather data".to_string()],
    }
}

pub fn disaster_assessment() -> DisasterAssessment {
    DisasterAssessment {
        preparedness_score: 50,
        risk_level: "medium".to_string(),
        recommendations: vec!["Please complete the assessment again".to_string()],
        immediate_actions: vec!["Create emergency supplies kit".to_string()],
        supplies_needed: vec!["Basic emergency supplies".to_string()],
    }
}

/// Randomized within fixed ranges so repeated failures don't render identical forecasts.
pub fn agricultural_weather<R: Rng + ?Sized>(location: &str, rng: &mut R) -> AgriculturalWeather {
    let forecast = vec![
        forecast_day(rng, "Today", "cloudy".to_string(), 8),
        {
            let icon = if rng.gen::<bool>() { "rainy" } else { "sunny" };
            forecast_day(rng, "Tomorrow", icon.to_string(), 12)
        },
        {
            let icon = if rng.gen::<bool>() { "sunny" } else { "cloudy" };
            forecast_day(rng, "Day 3", icon.to_string(), 6)
        },
    ];

    let mut map = Map::new();
    map.insert("current_temp".into(), json!(pick_temp(rng)));
    map.insert("condition".into(), json!(pick_condition(rng)));
    map.insert("icon".into(), json!("cloudy"));
    map.insert("wind_speed".into(), json!(rng.gen_range(8..=15)));
    map.insert("humidity".into(), json!(rng.gen_range(55..=75)));
    map.insert("precipitation".into(), json!(rng.gen_range(0..=5)));
    map.insert("feels_like".into(), json!(pick_temp(rng) + 2));
    map.insert("forecast".into(), Value::Array(forecast));
    map.insert(
        "crop_advice".into(),
        json!(format!(
            "Weather conditions in {location} are suitable for most crops. Monitor for changes."
        )),
    );
    map.insert(
        "irrigation_advice".into(),
        json!("Adjust irrigation based on rainfall patterns and soil moisture levels."),
    );
    map.insert(
        "protection_advice".into(),
        json!("Protect crops from extreme weather. Use organic methods when possible."),
    );
    AgriculturalWeather(map)
}

fn forecast_day<R: Rng + ?Sized>(rng: &mut R, day: &str, icon: String, max_rain: i64) -> Value {
    json!({
        "day": day,
        "high": pick_temp(rng),
        "low": pick_temp(rng) - 6,
        "condition": pick_condition(rng),
        "icon": icon,
        "rain": rng.gen_range(0..=max_rain),
    })
}

fn pick_temp<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    FALLBACK_TEMPS.choose(rng).copied().unwrap_or(FALLBACK_TEMPS[1])
}

fn pick_condition<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FALLBACK_CONDITIONS
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_CONDITIONS[1])
}
