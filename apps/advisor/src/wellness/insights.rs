use super::screening::{ScreeningKind, ScreeningRisk};
use super::sleep::SleepLog;
use crate::advice::fallback::recover;
use crate::advice::invoke::invoke_text;
use crate::advice::prompts::chat_prompt;
use crate::advice::Advisor;

const MAX_RECOMMENDATIONS: usize = 5;
const MAX_SLEEP_INSIGHTS: usize = 4;
/// Unbulleted lines shorter than this are treated as headings or noise.
const MIN_SENTENCE_LEN: usize = 20;

const BULLETS: &[char] = &['•', '-', '*'];

/// Pulls list items out of a free-text reply.
///
/// Bulleted lines lose their marker; other lines are kept only when they
/// read like a sentence.
pub fn extract_points(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            if line.starts_with(BULLETS) {
                Some(line.trim_start_matches(|c| BULLETS.contains(&c) || c == ' '))
            } else if line.chars().count() > MIN_SENTENCE_LEN {
                Some(line)
            } else {
                None
            }
        })
        .map(str::to_string)
        .collect()
}

pub fn canned_recommendations(kind: ScreeningKind) -> Vec<String> {
    let lines: &[&str] = match kind {
        ScreeningKind::Depression => &[
            "Maintain a regular sleep schedule and aim for 7-9 hours of sleep",
            "Engage in regular physical activity, even light walking can help",
            "Connect with friends, family, or support groups",
            "Practice mindfulness or meditation techniques",
            "Consider professional counseling if symptoms persist",
        ],
        ScreeningKind::Anxiety => &[
            "Practice deep breathing exercises when feeling anxious",
            "Try progressive muscle relaxation techniques",
            "Limit caffeine intake, especially in the afternoon",
            "Establish a calming bedtime routine",
            "Consider cognitive behavioral therapy (CBT) techniques",
        ],
        ScreeningKind::Stress => &[
            "Identify and address sources of stress in your life",
            "Practice time management and prioritization skills",
            "Take regular breaks throughout your day",
            "Engage in stress-reducing activities like yoga or meditation",
            "Build a strong support network of friends and family",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

pub fn canned_sleep_insights(wellness_score: i64) -> Vec<String> {
    let lines: &[&str] = match wellness_score {
        80.. => &[
            "Excellent sleep patterns! Your wellness score indicates healthy sleep habits.",
            "Continue maintaining your current sleep schedule and bedtime routine.",
            "Your sleep quality and duration are well-balanced for optimal health.",
        ],
        60..=79 => &[
            "Good sleep patterns with room for improvement.",
            "Consider optimizing your sleep environment for better quality rest.",
            "Try to maintain consistent sleep and wake times every day.",
        ],
        _ => &[
            "Your sleep patterns show signs that could benefit from attention.",
            "Consider establishing a regular bedtime routine and sleep schedule.",
            "Limit screen time before bed and create a calm sleep environment.",
            "If sleep issues persist, consider consulting with a healthcare provider.",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

impl Advisor {
    /// Up to five self-care recommendations for a screening outcome.
    pub async fn mental_health_recommendations(
        &self,
        kind: ScreeningKind,
        score: u32,
        risk: ScreeningRisk,
    ) -> Vec<String> {
        let (kind_name, risk_name) = (kind.as_str(), risk.as_str());
        let context =
            format!("Mental health {kind_name} screening with score {score} and {risk_name} risk level");
        let message = format!(
            "Provide 3-5 specific, actionable recommendations for someone with {kind_name} \
             screening results showing {risk_name} risk (score: {score}). Focus on practical \
             self-care strategies, when to seek professional help, and community resources."
        );

        let reply = invoke_text(self.model(), &chat_prompt(&message, &context))
            .await
            .map(|text| extract_points(&text));
        let mut points = recover("generate mental health recommendations", reply, Vec::new);
        if points.is_empty() {
            points = canned_recommendations(kind);
        }
        points.truncate(MAX_RECOMMENDATIONS);
        points
    }

    /// Up to four observations on one night's sleep.
    pub async fn sleep_insights(&self, log: &SleepLog) -> Vec<String> {
        let score = log.wellness_score();
        let message = format!(
            "Analyze this sleep data and provide 3-4 insights and recommendations: \
             Duration: {}h, Quality: {}/10, Fatigue: {}/10, Alertness: {}/10, Wellness Score: {score}/100",
            log.duration_hours, log.quality, log.fatigue, log.alertness
        );

        let reply = invoke_text(self.model(), &chat_prompt(&message, "Sleep wellness analysis"))
            .await
            .map(|text| extract_points(&text));
        let mut points = recover("generate sleep insights", reply, Vec::new);
        if points.is_empty() {
            points = canned_sleep_insights(score);
        }
        points.truncate(MAX_SLEEP_INSIGHTS);
        points
    }
}
