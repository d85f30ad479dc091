use std::fmt;

use thiserror::Error;

/// Failure of a single advice invocation.
///
/// Every variant is recoverable: the fallback boundary in `advice::fallback`
/// converts each of them into the use case's predefined value.
#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("model returned empty content")]
    EmptyResponse,

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Coarse failure class, used in log records and by the probe binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Endpoint,
    EmptyResponse,
    Parse,
}

impl AdviceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AdviceError::Endpoint(_) => FailureKind::Endpoint,
            AdviceError::EmptyResponse => FailureKind::EmptyResponse,
            AdviceError::Parse(_) => FailureKind::Parse,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Endpoint => "endpoint",
            FailureKind::EmptyResponse => "empty_response",
            FailureKind::Parse => "parse",
        };
        f.write_str(label)
    }
}

/// Transport, auth, quota or safety-block failure talking to the model endpoint.
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("undecodable response envelope: {0}")]
    Envelope(serde_json::Error),

    #[error("prompt blocked by endpoint: {reason}")]
    Blocked { reason: String },
}

/// The model's text could not be turned into the requested shape.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{shape}: response is not valid JSON: {source}")]
    InvalidJson {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{shape}: expected a JSON object, found {found}")]
    NotAnObject {
        shape: &'static str,
        found: &'static str,
    },

    #[error("{shape}: {}", join_problems(.problems))]
    Fields {
        shape: &'static str,
        problems: Vec<FieldProblem>,
    },
}

impl ParseError {
    /// Field-level problems, empty for the whole-document variants.
    pub fn problems(&self) -> &[FieldProblem] {
        match self {
            ParseError::Fields { problems, .. } => problems,
            _ => &[],
        }
    }
}

/// One missing or mistyped field of a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldProblem {
    /// Field path, e.g. `reasons` or `reasons[2]`.
    pub field: String,
    pub kind: ProblemKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProblemKind::Missing => write!(f, "missing field `{}`", self.field),
            ProblemKind::WrongType { expected, found } => {
                write!(f, "field `{}` expected {expected}, found {found}", self.field)
            }
        }
    }
}

/// A caller omitted an input that a guidance prompt cannot be built without.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is required")]
pub struct MissingInput(pub &'static str);

fn join_problems(problems: &[FieldProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_error_lists_every_problem() {
        let err = ParseError::Fields {
            shape: "HealthAdvice",
            problems: vec![
                FieldProblem {
                    field: "advice".to_string(),
                    kind: ProblemKind::Missing,
                },
                FieldProblem {
                    field: "recommended_actions".to_string(),
                    kind: ProblemKind::WrongType {
                        expected: "array",
                        found: "string",
                    },
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "HealthAdvice: missing field `advice`; field `recommended_actions` expected array, found string"
        );
        assert_eq!(err.problems().len(), 2);
    }

    #[test]
    fn test_advice_error_kind() {
        assert_eq!(AdviceError::EmptyResponse.kind(), FailureKind::EmptyResponse);
        let endpoint = AdviceError::from(EndpointError::Api {
            status: 429,
            message: "quota".to_string(),
        });
        assert_eq!(endpoint.kind(), FailureKind::Endpoint);
        assert_eq!(endpoint.kind().to_string(), "endpoint");
    }
}
