//! Structured Response Contract: the named shapes the model must produce.
//!
//! Every shape is read through a strict `FieldReader`: all missing, null or
//! mistyped fields are collected and reported together as one `ParseError`.
//! A value is only ever constructed when the whole field set checks out.

use serde_json::{Map, Value};

use crate::errors::{FieldProblem, ParseError, ProblemKind};
use crate::llm_client::strip_json_fences;

pub mod schema;
pub mod shapes;
pub mod weather;

pub use shapes::{
    ClimateAdvice, DisasterAssessment, HealthAdvice, JobMatch, NutritionPlan, RiskLevel,
    UrgencyLevel,
};
pub use weather::{AgriculturalWeather, FarmingGuidance, ForecastDay, WeatherConditions};

/// A fixed-field response contract.
pub trait Shape: Sized {
    /// Shape name used in errors and logs.
    const NAME: &'static str;

    /// Response schema in Gemini's OpenAPI-subset dialect.
    fn response_schema() -> Value;

    fn from_json(value: &Value) -> Result<Self, ParseError>;
}

/// Parses model text as a JSON document, tolerating markdown code fences.
pub fn parse_document(shape: &'static str, text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(strip_json_fences(text))
        .map_err(|source| ParseError::InvalidJson { shape, source })
}

pub fn parse_shape<T: Shape>(text: &str) -> Result<T, ParseError> {
    let value = parse_document(T::NAME, text)?;
    T::from_json(&value)
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads typed fields out of a JSON object, accumulating problems instead of
/// stopping at the first one.
pub struct FieldReader<'a> {
    shape: &'static str,
    object: &'a Map<String, Value>,
    problems: Vec<FieldProblem>,
}

impl<'a> FieldReader<'a> {
    pub fn new(shape: &'static str, value: &'a Value) -> Result<Self, ParseError> {
        match value {
            Value::Object(object) => Ok(Self {
                shape,
                object,
                problems: Vec::new(),
            }),
            other => Err(ParseError::NotAnObject {
                shape,
                found: json_type_name(other),
            }),
        }
    }

    pub fn string(&mut self, field: &str) -> String {
        self.read(field, "string", |v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// A number with no fractional part. `50.0` is accepted as `50`.
    pub fn integer(&mut self, field: &str) -> i64 {
        self.read(field, "integer", |v| {
            v.as_i64().or_else(|| {
                v.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
        })
        .unwrap_or_default()
    }

    pub fn number(&mut self, field: &str) -> f64 {
        self.read(field, "number", Value::as_f64)
            .unwrap_or_default()
    }

    pub fn string_list(&mut self, field: &str) -> Vec<String> {
        let Some(items) = self.read(field, "array", |v| v.as_array().cloned()) else {
            return Vec::new();
        };

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_string()),
                None => self.problems.push(FieldProblem {
                    field: format!("{field}[{index}]"),
                    kind: ProblemKind::WrongType {
                        expected: "string",
                        found: json_type_name(item),
                    },
                }),
            }
        }
        out
    }

    /// Returns `value` only if no field problem was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ParseError> {
        if self.problems.is_empty() {
            Ok(value)
        } else {
            Err(ParseError::Fields {
                shape: self.shape,
                problems: self.problems,
            })
        }
    }

    fn read<T>(
        &mut self,
        field: &str,
        expected: &'static str,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Option<T> {
        let Some(value) = self.object.get(field) else {
            self.problems.push(FieldProblem {
                field: field.to_string(),
                kind: ProblemKind::Missing,
            });
            return None;
        };

        let converted = convert(value);
        if converted.is_none() {
            self.problems.push(FieldProblem {
                field: field.to_string(),
                kind: ProblemKind::WrongType {
                    expected,
                    found: json_type_name(value),
                },
            });
        }
        converted
    }
}
