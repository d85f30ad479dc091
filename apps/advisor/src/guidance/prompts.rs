// Prompt templates for the free-text guidance requests.
// Placeholders in braces are replaced before sending.

pub const AGRICULTURE_CONTEXT: &str = "Agricultural advisory";
pub const WATER_CONTEXT: &str = "Water management planning";
pub const CAREER_CONTEXT: &str = "Career development planning";
pub const SKILL_ASSESSMENT_CONTEXT: &str = "Skill assessment";
pub const LEARNING_FEEDBACK_CONTEXT: &str = "Learning feedback";
pub const SCHEMES_CONTEXT: &str = "Government schemes search";

pub const AGRICULTURE_TEMPLATE: &str = r#"You are an expert agricultural advisor helping farmers and food producers.
Provide practical, actionable advice for:

User Question: {message}

Focus on:
- Sustainable farming practices
- Crop management and cultivation
- Soil health and fertilization
- Pest and disease management
- Water management and irrigation
- Market insights and timing
- Government schemes and support

Keep responses practical and suitable for small to medium scale farmers."#;

pub const WATER_TEMPLATE: &str = r#"Create a comprehensive water management plan for:

Crop: {crop}
Soil Type: {soil_type}
Field Size: {field_size} acres
Season: {season}
Location: {location}

Provide:
1. Water requirements and irrigation schedule
2. Efficient irrigation methods
3. Water conservation strategies
4. Seasonal adjustments
5. Soil-specific recommendations

Focus on practical, cost-effective solutions."#;

pub const CAREER_TEMPLATE: &str = r#"Create a comprehensive career development plan for someone with the following details:

Career Goal: {career_goal}
Current Level: {current_level}
Timeline: {timeframe}
Current Skills: {current_skills}

Please provide:
1. A clear learning pathway with specific steps
2. Skill development priorities
3. Resources and opportunities to pursue
4. Realistic milestones and timelines
5. Potential challenges and how to overcome them

Focus on practical, actionable advice for someone in an underserved community."#;

pub const SKILL_ASSESSMENT_TEMPLATE: &str = r#"Assess the skill level and provide recommendations based on these assessment responses:

Skill Area: {skill_area}
Responses: {responses}

Please provide:
1. Current skill level (Beginner/Intermediate/Advanced)
2. Specific strengths identified
3. Areas for improvement
4. Recommended learning path
5. Suggested next steps

Focus on practical, community-relevant skills development."#;

pub const LEARNING_FEEDBACK_TEMPLATE: &str = r#"Provide constructive feedback on this learning exercise response:

Lesson Topic: {topic}
Student Response: {answer}

Please provide:
1. Positive aspects of the response
2. Areas for improvement
3. Specific suggestions for enhancement
4. Additional resources or next steps

Keep feedback encouraging and focused on practical application."#;

pub const SCHEMES_TEMPLATE: &str = r#"Find relevant Indian government agricultural schemes based on:

Query: {query}
Farming Type: {farming_type}
Location: {location}
Language: {language}

Provide information about:
1. Scheme names and descriptions
2. Eligibility criteria
3. Benefits and support provided
4. Application process
5. Contact information

Focus on currently active schemes and provide practical guidance.
Respond in {language} language."#;

/// Fills `{key}` placeholders in `template`.
pub fn fill<V: AsRef<str>>(template: &str, values: &[(&str, V)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value.as_ref())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let text = fill(SCHEMES_TEMPLATE, &[("query", "drip subsidy"), ("language", "Hindi")]);
        assert!(text.contains("Query: drip subsidy"));
        assert!(text.contains("Language: Hindi"));
        assert!(text.ends_with("Respond in Hindi language."));
        assert!(text.contains("{farming_type}"));
    }
}
