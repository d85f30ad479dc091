use serde::Serialize;

/// Self-assessment questionnaires, each item scored 0–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningKind {
    /// PHQ-9.
    Depression,
    /// GAD-7.
    Anxiety,
    Stress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningRisk {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreeningResult {
    pub kind: ScreeningKind,
    pub score: u32,
    pub risk_level: ScreeningRisk,
    pub recommendation: &'static str,
}

impl ScreeningKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "depression" => Some(Self::Depression),
            "anxiety" => Some(Self::Anxiety),
            "stress" => Some(Self::Stress),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Depression => "depression",
            Self::Anxiety => "anxiety",
            Self::Stress => "stress",
        }
    }

    pub fn question_count(&self) -> usize {
        match self {
            Self::Depression => 9,
            Self::Anxiety => 7,
            Self::Stress => 5,
        }
    }
}

impl ScreeningRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Sums the first `question_count` answers; missing answers count as 0.
pub fn score_screening(kind: ScreeningKind, answers: &[u8]) -> ScreeningResult {
    let score: u32 = answers
        .iter()
        .take(kind.question_count())
        .map(|&a| u32::from(a))
        .sum();

    let (risk_level, recommendation) = match kind {
        ScreeningKind::Depression => match score {
            0..=4 => (ScreeningRisk::Low, "Minimal depression symptoms. Continue monitoring your mood and maintain healthy habits."),
            5..=9 => (ScreeningRisk::Moderate, "Mild depression symptoms. Consider speaking with a healthcare professional or counselor."),
            10..=14 => (ScreeningRisk::Moderate, "Moderate depression symptoms. We recommend consulting with a mental health professional."),
            _ => (ScreeningRisk::High, "Severe depression symptoms. Please seek immediate professional help. Contact a healthcare provider or call 988 for crisis support."),
        },
        ScreeningKind::Anxiety => match score {
            0..=4 => (ScreeningRisk::Low, "Minimal anxiety symptoms. Practice stress management techniques and maintain healthy routines."),
            5..=9 => (ScreeningRisk::Moderate, "Mild anxiety symptoms. Consider relaxation techniques, exercise, or speaking with a counselor."),
            10..=14 => (ScreeningRisk::Moderate, "Moderate anxiety symptoms. We recommend professional consultation and anxiety management strategies."),
            _ => (ScreeningRisk::High, "Severe anxiety symptoms. Please seek professional help. Contact a healthcare provider for anxiety treatment options."),
        },
        ScreeningKind::Stress => match score {
            0..=6 => (ScreeningRisk::Low, "Low stress levels. Continue current stress management practices and maintain work-life balance."),
            7..=12 => (ScreeningRisk::Moderate, "Moderate stress levels. Consider stress reduction techniques, time management, and relaxation practices."),
            _ => (ScreeningRisk::High, "High stress levels. We recommend professional stress management counseling and lifestyle changes."),
        },
    };

    ScreeningResult {
        kind,
        score,
        risk_level,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depression_thresholds() {
        let low = score_screening(ScreeningKind::Depression, &[1, 1, 1, 1, 0, 0, 0, 0, 0]);
        assert_eq!((low.score, low.risk_level), (4, ScreeningRisk::Low));

        let mild = score_screening(ScreeningKind::Depression, &[3, 2]);
        assert_eq!((mild.score, mild.risk_level), (5, ScreeningRisk::Moderate));
        assert!(mild.recommendation.starts_with("Mild"));

        let moderate = score_screening(ScreeningKind::Depression, &[3, 3, 3, 3, 2]);
        assert_eq!((moderate.score, moderate.risk_level), (14, ScreeningRisk::Moderate));
        assert!(moderate.recommendation.starts_with("Moderate"));

        let severe = score_screening(ScreeningKind::Depression, &[3, 3, 3, 3, 3]);
        assert_eq!(severe.risk_level, ScreeningRisk::High);
    }

    #[test]
    fn test_extra_answers_ignored() {
        let result = score_screening(ScreeningKind::Stress, &[3, 3, 3, 3, 3, 3, 3]);
        assert_eq!(result.score, 15);
        assert_eq!(result.risk_level, ScreeningRisk::High);
    }

    #[test]
    fn test_stress_thresholds() {
        assert_eq!(
            score_screening(ScreeningKind::Stress, &[3, 3]).risk_level,
            ScreeningRisk::Low
        );
        assert_eq!(
            score_screening(ScreeningKind::Stress, &[3, 3, 3, 3]).risk_level,
            ScreeningRisk::Moderate
        );
    }

    #[test]
    fn test_anxiety_uses_seven_items() {
        let result = score_screening(ScreeningKind::Anxiety, &[1; 9]);
        assert_eq!(result.score, 7);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ScreeningKind::parse(" Anxiety "), Some(ScreeningKind::Anxiety));
        assert_eq!(ScreeningKind::parse("burnout"), None);
    }
}
