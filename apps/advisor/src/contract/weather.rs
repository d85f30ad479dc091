//! Agricultural weather: the one free-form shape.
//!
//! The model is asked for a documented key set but the result is kept as an
//! untyped JSON object. Typed views apply caller defaults per key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::json_type_name;
use crate::errors::ParseError;

pub const SHAPE_NAME: &str = "AgriculturalWeather";

const DEFAULT_CROP_ADVICE: &str = "Weather conditions are suitable for farming activities.";
const DEFAULT_IRRIGATION_ADVICE: &str = "Monitor soil moisture and adjust irrigation as needed.";
const DEFAULT_PROTECTION_ADVICE: &str = "Protect crops from extreme weather conditions.";

/// Untyped forecast object: `current_temp`, `condition`, `icon`, `wind_speed`,
/// `humidity`, `precipitation`, `feels_like`, `forecast`, `crop_advice`,
/// `irrigation_advice`, `protection_advice`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AgriculturalWeather(pub Map<String, Value>);

/// One forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub high: f64,
    pub low: f64,
    pub condition: String,
    pub icon: String,
    pub rain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherConditions {
    pub current_temp: f64,
    pub condition: String,
    pub icon: String,
    pub wind_speed: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub feels_like: f64,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmingGuidance {
    pub crop_advice: String,
    pub irrigation_advice: String,
    pub protection_advice: String,
}

impl AgriculturalWeather {
    /// Only requires a JSON object; individual keys are not checked.
    pub fn from_json(value: Value) -> Result<Self, ParseError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ParseError::NotAnObject {
                shape: SHAPE_NAME,
                found: json_type_name(&other),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn conditions(&self) -> WeatherConditions {
        WeatherConditions {
            current_temp: self.number_or("current_temp", 28.0),
            condition: self.text_or("condition", "Partly Cloudy"),
            icon: self.text_or("icon", "cloudy"),
            wind_speed: self.number_or("wind_speed", 12.0),
            humidity: self.number_or("humidity", 65.0),
            precipitation: self.number_or("precipitation", 2.0),
            feels_like: self.number_or("feels_like", 31.0),
            forecast: self.forecast(),
        }
    }

    pub fn guidance(&self) -> FarmingGuidance {
        FarmingGuidance {
            crop_advice: self.text_or("crop_advice", DEFAULT_CROP_ADVICE),
            irrigation_advice: self.text_or("irrigation_advice", DEFAULT_IRRIGATION_ADVICE),
            protection_advice: self.text_or("protection_advice", DEFAULT_PROTECTION_ADVICE),
        }
    }

    /// Forecast entries that carry the full day record; malformed entries are skipped.
    pub fn forecast(&self) -> Vec<ForecastDay> {
        self.0
            .get("forecast")
            .and_then(Value::as_array)
            .map(|days| {
                days.iter()
                    .filter_map(|day| serde_json::from_value(day.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn number_or(&self, key: &str, default: f64) -> f64 {
        self.0.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    fn text_or(&self, key: &str, default: &str) -> String {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_non_object_rejected() {
        let err = AgriculturalWeather::from_json(json!("sunny")).unwrap_err();
        assert!(matches!(err, ParseError::NotAnObject { found: "string", .. }));
    }

    #[test]
    fn test_views_apply_defaults_for_missing_keys() {
        let weather = AgriculturalWeather::from_json(json!({"current_temp": 33})).unwrap();
        let conditions = weather.conditions();
        assert_eq!(conditions.current_temp, 33.0);
        assert_eq!(conditions.condition, "Partly Cloudy");
        assert_eq!(conditions.feels_like, 31.0);
        assert!(conditions.forecast.is_empty());
        assert_eq!(weather.guidance().crop_advice, DEFAULT_CROP_ADVICE);
    }

    #[test]
    fn test_forecast_skips_malformed_days() {
        let weather = AgriculturalWeather::from_json(json!({
            "forecast": [
                {"day": "Today", "high": 34, "low": 24, "condition": "Sunny", "icon": "sunny", "rain": 0},
                {"day": "Tomorrow", "high": "hot"}
            ]
        }))
        .unwrap();
        let forecast = weather.forecast();
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast[0].high, 34.0);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let weather = AgriculturalWeather::from_json(json!({"icon": "rainy"})).unwrap();
        assert_eq!(serde_json::to_value(&weather).unwrap(), json!({"icon": "rainy"}));
    }
}
