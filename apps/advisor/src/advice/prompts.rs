// All prompt wording for the advice use cases.
// Builders are pure: same inputs, same text.

use serde_json::{Map, Value};

use crate::llm_client::prompts::{LabeledText, Prompt};

pub const HEALTH_SYSTEM: &str = "You are a helpful health advisor for underserved communities. \
    Provide practical, safe health advice based on symptoms. \
    Always recommend consulting healthcare professionals for serious concerns. \
    Focus on preventive care and accessible remedies.";

pub const JOB_MATCH_SYSTEM: &str = "You are an AI career advisor for underserved communities. \
    Analyze job descriptions against user skills and provide matching scores, \
    identify skill gaps, and suggest practical improvements.";

pub const NUTRITION_SYSTEM: &str = "You are a nutrition advisor for underserved communities. \
    Provide practical, affordable nutrition advice that considers \
    limited resources and local food availability. Focus on accessible, \
    culturally appropriate recommendations.";

pub const INDIA_WEATHER_SYSTEM: &str = "You are a weather and climate advisor for India. \
    Provide current weather conditions, temperature, humidity and practical advice \
    for the specified location in India. Focus on actionable recommendations \
    for community members dealing with Indian climate conditions.";

pub const DISASTER_SYSTEM: &str = "You are a disaster preparedness expert for Indian communities. \
    Analyze questionnaire responses and provide a preparedness score (0-100), \
    risk level assessment, and specific recommendations based on the disaster type and location.";

pub const AGRI_WEATHER_SYSTEM: &str = "You are an agricultural weather advisor for Indian farmers. \
    Provide current weather conditions, 3-day forecast, and specific farming advice. \
    Include temperature, humidity, wind, rainfall predictions, and actionable recommendations \
    for crop management, irrigation, and plant protection based on weather conditions.";

pub const CHAT_SYSTEM: &str = "You are a helpful assistant for a community platform serving \
    underserved populations. Provide supportive, practical advice \
    focusing on health, education, climate action, and economic opportunities. \
    Be empathetic and culturally sensitive.";

/// Agricultural weather prompt template. Replace `{location}` before sending.
pub const AGRI_WEATHER_PROMPT_TEMPLATE: &str = r#"Provide agricultural weather forecast and advice for {location}.

Include:
1. Current weather: temperature (°C), condition, wind speed (km/h), humidity (%), precipitation (mm), feels like temperature
2. 3-day forecast with daily high/low temperatures, conditions, and expected rainfall
3. Crop advice based on weather conditions
4. Irrigation recommendations
5. Plant protection advice

Format as JSON with:
- current_temp: number
- condition: string
- icon: string (sunny/cloudy/rainy)
- wind_speed: number
- humidity: number
- precipitation: number
- feels_like: number
- forecast: array of 3 days with day, high, low, condition, icon, rain
- crop_advice: string
- irrigation_advice: string
- protection_advice: string"#;

/// Appends ", India" unless the location already names the country as a word.
pub fn india_location(location: &str) -> String {
    let location = location.trim();
    let names_country = location
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word.eq_ignore_ascii_case("india"));
    if names_country {
        location.to_string()
    } else {
        format!("{location}, India")
    }
}

pub fn health_prompt(symptoms: &str, age: Option<u32>, gender: Option<&str>) -> Prompt {
    let text = LabeledText::new("Symptoms", symptoms)
        .optional("Age", age.filter(|&years| years > 0))
        .optional("Gender", gender)
        .finish();
    Prompt::with_system(HEALTH_SYSTEM, text)
}

pub fn job_match_prompt(job_description: &str, user_skills: &[String]) -> Prompt {
    let text = format!(
        "Job: {job_description}\nUser Skills: {}",
        user_skills.join(", ")
    );
    Prompt::with_system(JOB_MATCH_SYSTEM, text)
}

pub fn nutrition_prompt(
    dietary_preferences: &str,
    health_conditions: Option<&str>,
    budget: &str,
) -> Prompt {
    let text = LabeledText::new("Dietary preferences", dietary_preferences)
        .field("Budget", budget)
        .optional("Health conditions", health_conditions)
        .finish();
    Prompt::with_system(NUTRITION_SYSTEM, text)
}

pub fn india_weather_prompt(location: &str) -> Prompt {
    let text = format!(
        "Provide current weather information and climate advice for {}. \
         Include temperature, humidity, current conditions, and practical recommendations \
         for today's weather.",
        india_location(location)
    );
    Prompt::with_system(INDIA_WEATHER_SYSTEM, text)
}

pub fn disaster_prompt(disaster_type: &str, responses: &Map<String, Value>, location: &str) -> Prompt {
    let text = format!(
        "Disaster type: {disaster_type}, Location: {}. User responses: {}. \
         Provide preparedness assessment.",
        india_location(location),
        Value::Object(responses.clone())
    );
    Prompt::with_system(DISASTER_SYSTEM, text)
}

/// Plain-text prompt with no system instruction.
pub fn climate_advice_prompt(location: &str, climate_data: Option<&Value>) -> Prompt {
    let mut text = format!(
        "Provide climate adaptation and sustainable living advice for {}. \
         Focus on practical, low-cost solutions for underserved communities in Indian context.",
        india_location(location)
    );
    if let Some(data) = climate_data.filter(|d| !is_empty_json(d)) {
        text.push_str(&format!(" Consider this weather data: {data}"));
    }
    Prompt::user(text)
}

pub fn agricultural_weather_prompt(location: &str) -> Prompt {
    let text = AGRI_WEATHER_PROMPT_TEMPLATE.replace("{location}", &india_location(location));
    Prompt::with_system(AGRI_WEATHER_SYSTEM, text)
}

pub fn chat_prompt(message: &str, context: &str) -> Prompt {
    let text = if context.trim().is_empty() {
        message.to_string()
    } else {
        format!("Context: {context}\nUser message: {message}")
    };
    Prompt::with_system(CHAT_SYSTEM, text)
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
