use serde::Serialize;
use serde_json::Value;

use super::schema::{integer, number, object, string, string_array};
use super::{FieldReader, Shape};
use crate::errors::ParseError;

// ────────────────────────────────────────────────────────────────────────────
// Health
// ────────────────────────────────────────────────────────────────────────────

/// Symptom-based health advice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthAdvice {
    pub advice: String,
    /// Enum-like; see `urgency()` for the typed reading.
    pub urgency_level: String,
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Emergency,
}

impl UrgencyLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Medium),
            "high" => Some(Self::High),
            "emergency" | "critical" => Some(Self::Emergency),
            _ => None,
        }
    }
}

impl HealthAdvice {
    /// `None` when the model used a label outside the known set.
    pub fn urgency(&self) -> Option<UrgencyLevel> {
        UrgencyLevel::parse(&self.urgency_level)
    }

    /// Reply text for the symptom chat.
    pub fn to_chat_markdown(&self) -> String {
        let mut out = String::from("Based on your symptoms, here's my advice:\n\n");
        out.push_str(&format!("**Advice:** {}\n\n", self.advice));
        out.push_str(&format!("**Urgency Level:** {}\n\n", self.urgency_level));
        out.push_str("**Recommended Actions:**\n");
        for action in &self.recommended_actions {
            out.push_str(&format!("• {action}\n"));
        }
        out
    }
}

impl Shape for HealthAdvice {
    const NAME: &'static str = "HealthAdvice";

    fn response_schema() -> Value {
        object(&[
            ("advice", string()),
            ("urgency_level", string()),
            ("recommended_actions", string_array()),
        ])
    }

    fn from_json(value: &Value) -> Result<Self, ParseError> {
        let mut r = FieldReader::new(Self::NAME, value)?;
        let advice = HealthAdvice {
            advice: r.string("advice"),
            urgency_level: r.string("urgency_level"),
            recommended_actions: r.string_list("recommended_actions"),
        };
        r.finish(advice)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Job-to-skills match.
///
/// `match_score` is expected in 0.0–1.0 but is passed through unchecked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatch {
    pub match_score: f64,
    pub reasons: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Shape for JobMatch {
    const NAME: &'static str = "JobMatch";

    fn response_schema() -> Value {
        object(&[
            ("match_score", number()),
            ("reasons", string_array()),
            ("skill_gaps", string_array()),
            ("recommendations", string_array()),
        ])
    }

    fn from_json(value: &Value) -> Result<Self, ParseError> {
        let mut r = FieldReader::new(Self::NAME, value)?;
        let matched = JobMatch {
            match_score: r.number("match_score"),
            reasons: r.string_list("reasons"),
            skill_gaps: r.string_list("skill_gaps"),
            recommendations: r.string_list("recommendations"),
        };
        r.finish(matched)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Food
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionPlan {
    pub daily_calories: i64,
    pub meal_suggestions: Vec<String>,
    pub nutritional_tips: Vec<String>,
    pub warnings: Vec<String>,
}

impl Shape for NutritionPlan {
    const NAME: &'static str = "NutritionPlan";

    fn response_schema() -> Value {
        object(&[
            ("daily_calories", integer()),
            ("meal_suggestions", string_array()),
            ("nutritional_tips", string_array()),
            ("warnings", string_array()),
        ])
    }

    fn from_json(value: &Value) -> Result<Self, ParseError> {
        let mut r = FieldReader::new(Self::NAME, value)?;
        let plan = NutritionPlan {
            daily_calories: r.integer("daily_calories"),
            meal_suggestions: r.string_list("meal_suggestions"),
            nutritional_tips: r.string_list("nutritional_tips"),
            warnings: r.string_list("warnings"),
        };
        r.finish(plan)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Climate
// ────────────────────────────────────────────────────────────────────────────

/// Current conditions plus advice for a location. Temperature and humidity
/// are display strings ("32°C", "60%").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateAdvice {
    pub current_conditions: String,
    pub temperature: String,
    pub humidity: String,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

impl Shape for ClimateAdvice {
    const NAME: &'static str = "ClimateAdvice";

    fn response_schema() -> Value {
        object(&[
            ("current_conditions", string()),
            ("temperature", string()),
            ("humidity", string()),
            ("recommendations", string_array()),
            ("warnings", string_array()),
        ])
    }

    fn from_json(value: &Value) -> Result<Self, ParseError> {
        let mut r = FieldReader::new(Self::NAME, value)?;
        let advice = ClimateAdvice {
            current_conditions: r.string("current_conditions"),
            temperature: r.string("temperature"),
            humidity: r.string("humidity"),
            recommendations: r.string_list("recommendations"),
            warnings: r.string_list("warnings"),
        };
        r.finish(advice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisasterAssessment {
    /// Intended range 0–100; not enforced.
    pub preparedness_score: i64,
    pub risk_level: String,
    pub recommendations: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub supplies_needed: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl DisasterAssessment {
    pub fn risk(&self) -> Option<RiskLevel> {
        RiskLevel::parse(&self.risk_level)
    }
}

impl Shape for DisasterAssessment {
    const NAME: &'static str = "DisasterAssessment";

    fn response_schema() -> Value {
        object(&[
            ("preparedness_score", integer()),
            ("risk_level", string()),
            ("recommendations", string_array()),
            ("immediate_actions", string_array()),
            ("supplies_needed", string_array()),
        ])
    }

    fn from_json(value: &Value) -> Result<Self, ParseError> {
        let mut r = FieldReader::new(Self::NAME, value)?;
        let assessment = DisasterAssessment {
            preparedness_score: r.integer("preparedness_score"),
            risk_level: r.string("risk_level"),
            recommendations: r.string_list("recommendations"),
            immediate_actions: r.string_list("immediate_actions"),
            supplies_needed: r.string_list("supplies_needed"),
        };
        r.finish(assessment)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::contract::parse_shape;
    use crate::errors::ProblemKind;

    #[test]
    fn test_health_advice_full_deserializes_correctly() {
        let json = r#"{
            "advice": "Rest, stay hydrated and monitor your temperature.",
            "urgency_level": "Medium",
            "recommended_actions": ["Drink fluids", "Take paracetamol if needed"],
            "extra_field": "ignored"
        }"#;
        let advice: HealthAdvice = parse_shape(json).unwrap();
        assert_eq!(advice.urgency(), Some(UrgencyLevel::Medium));
        assert_eq!(advice.recommended_actions.len(), 2);
    }

    #[test]
    fn test_health_advice_null_field_rejected() {
        let value = json!({"advice": null, "urgency_level": "low", "recommended_actions": []});
        let err = HealthAdvice::from_json(&value).unwrap_err();
        assert_eq!(
            err.problems()[0].kind,
            ProblemKind::WrongType { expected: "string", found: "null" }
        );
    }

    #[test]
    fn test_job_match_reports_every_missing_field() {
        let err = parse_shape::<JobMatch>(r#"{"reasons": ["Knows Rust"]}"#).unwrap_err();
        let fields: Vec<&str> = err.problems().iter().map(|p| p.field.as_str()).collect();
        assert_eq!(fields, vec!["match_score", "skill_gaps", "recommendations"]);
    }

    #[test]
    fn test_job_match_score_out_of_range_passes_through() {
        let job: JobMatch = parse_shape(
            r#"{"match_score": 85, "reasons": [], "skill_gaps": [], "recommendations": []}"#,
        )
        .unwrap();
        assert_eq!(job.match_score, 85.0);
    }

    #[test]
    fn test_nutrition_plan_rejects_fractional_calories() {
        let value = json!({
            "daily_calories": 1850.5,
            "meal_suggestions": ["Dal and rice"],
            "nutritional_tips": [],
            "warnings": []
        });
        let err = NutritionPlan::from_json(&value).unwrap_err();
        assert_eq!(err.problems().len(), 1);
        assert_eq!(err.problems()[0].field, "daily_calories");
    }

    #[test]
    fn test_climate_advice_deserializes() {
        let value = json!({
            "current_conditions": "Hazy sunshine",
            "temperature": "34°C",
            "humidity": "40%",
            "recommendations": ["Stay indoors at noon"],
            "warnings": ["Poor air quality"]
        });
        let advice = ClimateAdvice::from_json(&value).unwrap();
        assert_eq!(advice.temperature, "34°C");
    }

    #[test]
    fn test_disaster_assessment_risk_reading() {
        let value = json!({
            "preparedness_score": 72,
            "risk_level": " HIGH ",
            "recommendations": [],
            "immediate_actions": ["Move valuables upstairs"],
            "supplies_needed": ["Torch"]
        });
        let assessment = DisasterAssessment::from_json(&value).unwrap();
        assert_eq!(assessment.preparedness_score, 72);
        assert_eq!(assessment.risk(), Some(RiskLevel::High));
    }

    #[test]
    fn test_unknown_urgency_label_is_none() {
        assert_eq!(UrgencyLevel::parse("see a doctor"), None);
        assert_eq!(UrgencyLevel::parse("critical"), Some(UrgencyLevel::Emergency));
    }

    #[test]
    fn test_schemas_require_all_fields() {
        let schema = DisasterAssessment::response_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 5);
        assert_eq!(schema["properties"]["preparedness_score"]["type"], "INTEGER");
        assert_eq!(JobMatch::response_schema()["properties"]["match_score"]["type"], "NUMBER");
    }

    #[test]
    fn test_health_advice_chat_markdown() {
        let advice = HealthAdvice {
            advice: "Rest".to_string(),
            urgency_level: "low".to_string(),
            recommended_actions: vec!["Drink water".to_string(), "Sleep".to_string()],
        };
        assert_eq!(
            advice.to_chat_markdown(),
            "Based on your symptoms, here's my advice:\n\n**Advice:** Rest\n\n**Urgency Level:** low\n\n**Recommended Actions:**\n• Drink water\n• Sleep\n"
        );
    }
}
