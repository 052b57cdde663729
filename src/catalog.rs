//! Static catalog of therapeutic frameworks.
//!
//! Maps each framework identifier to its system prompt, display name, and
//! short description. Every prompt instructs the model to close with the
//! marker line the normalizer parses; that instruction is the contract
//! between this catalog and `normalize`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReframeError;

/// Literal the model is told to emit ahead of its one-line reframe.
pub const REFRAME_MARKER: &str = "**Reframed thought:**";

const MARKER_INSTRUCTION: &str = r#"IMPORTANT: Always end your response with a concise summary line in this exact format:
**Reframed thought:** "[One clear, positive restatement of their original thought in 10-15 words]""#;

/// The nine selectable therapeutic frameworks. Fixed at build time; each
/// identifier has exactly one prompt, one display name, one description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkId {
    Cbt,
    Act,
    Dbt,
    Mindfulness,
    Positive,
    Stoic,
    Compassion,
    Solution,
    Narrative,
}

impl FrameworkId {
    pub const ALL: [FrameworkId; 9] = [
        FrameworkId::Cbt,
        FrameworkId::Act,
        FrameworkId::Dbt,
        FrameworkId::Mindfulness,
        FrameworkId::Positive,
        FrameworkId::Stoic,
        FrameworkId::Compassion,
        FrameworkId::Solution,
        FrameworkId::Narrative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameworkId::Cbt => "cbt",
            FrameworkId::Act => "act",
            FrameworkId::Dbt => "dbt",
            FrameworkId::Mindfulness => "mindfulness",
            FrameworkId::Positive => "positive",
            FrameworkId::Stoic => "stoic",
            FrameworkId::Compassion => "compassion",
            FrameworkId::Solution => "solution",
            FrameworkId::Narrative => "narrative",
        }
    }

    /// Full system prompt for this framework, marker instruction included.
    pub fn system_prompt(&self) -> String {
        format!("{}\n\n{}", self.prompt_body(), MARKER_INSTRUCTION)
    }

    /// System prompt with an optional tone instruction appended. The tone
    /// adjusts prompt content only; parsing is unaffected.
    pub fn system_prompt_with_tone(&self, tone: Tone) -> String {
        match tone.instruction() {
            Some(instruction) => format!(
                "{}\n\nTone: {}\n\n{}",
                self.prompt_body(),
                instruction,
                MARKER_INSTRUCTION
            ),
            None => self.system_prompt(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FrameworkId::Cbt => "Cognitive Behavioral Therapy",
            FrameworkId::Act => "Acceptance & Commitment Therapy",
            FrameworkId::Dbt => "Dialectical Behavior Therapy",
            FrameworkId::Mindfulness => "Mindfulness-Based",
            FrameworkId::Positive => "Positive Psychology",
            FrameworkId::Stoic => "Stoic Philosophy",
            FrameworkId::Compassion => "Self-Compassion",
            FrameworkId::Solution => "Solution-Focused",
            FrameworkId::Narrative => "Narrative Therapy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FrameworkId::Cbt => "Challenges negative thought patterns and cognitive distortions",
            FrameworkId::Act => "Accepts difficult feelings while focusing on values-based action",
            FrameworkId::Dbt => "Balances acceptance and change with emotional regulation skills",
            FrameworkId::Mindfulness => {
                "Observes thoughts with non-judgmental present-moment awareness"
            }
            FrameworkId::Positive => "Focuses on strengths, gratitude, and growth opportunities",
            FrameworkId::Stoic => "Emphasizes what you can control and builds inner resilience",
            FrameworkId::Compassion => "Treats yourself with kindness and understanding",
            FrameworkId::Solution => "Identifies what works and builds on existing strengths",
            FrameworkId::Narrative => "Helps you re-author your story and separate from problems",
        }
    }

    fn prompt_body(&self) -> &'static str {
        match self {
            FrameworkId::Cbt => CBT_PROMPT,
            FrameworkId::Act => ACT_PROMPT,
            FrameworkId::Dbt => DBT_PROMPT,
            FrameworkId::Mindfulness => MINDFULNESS_PROMPT,
            FrameworkId::Positive => POSITIVE_PROMPT,
            FrameworkId::Stoic => STOIC_PROMPT,
            FrameworkId::Compassion => COMPASSION_PROMPT,
            FrameworkId::Solution => SOLUTION_PROMPT,
            FrameworkId::Narrative => NARRATIVE_PROMPT,
        }
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameworkId {
    type Err = ReframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameworkId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| ReframeError::Validation {
                message: format!("unknown framework '{}'", s),
            })
    }
}

/// Optional voice adjustment layered onto any framework prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Warm,
    Direct,
}

impl Tone {
    fn instruction(&self) -> Option<&'static str> {
        match self {
            Tone::Neutral => None,
            Tone::Warm => Some(
                "Respond with warmth, emotional validation, and gentleness, like a caring friend.",
            ),
            Tone::Direct => Some(
                "Respond with calm clarity, direct motivation, and subtle encouragement, like a grounded coach or mentor.",
            ),
        }
    }
}

impl FromStr for Tone {
    type Err = ReframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(Tone::Neutral),
            "warm" => Ok(Tone::Warm),
            "direct" => Ok(Tone::Direct),
            other => Err(ReframeError::Validation {
                message: format!("unknown tone '{}'", other),
            }),
        }
    }
}

const CBT_PROMPT: &str = r#"You are a compassionate cognitive behavioral therapy assistant. Your role is to help users reframe negative thoughts into more balanced, realistic, and positive perspectives.

Guidelines:
- Be empathetic and understanding
- Identify cognitive distortions (all-or-nothing thinking, catastrophizing, etc.)
- Provide constructive reframes that acknowledge the user's feelings
- Focus on realistic optimism, not toxic positivity
- Use evidence-based thinking and challenge negative assumptions
- Encourage examining thoughts for accuracy and helpfulness"#;

const ACT_PROMPT: &str = r#"You are a compassionate Acceptance and Commitment Therapy guide. Help users accept difficult thoughts and feelings while focusing on values-based action.

Guidelines:
- Acknowledge that difficult thoughts and feelings are normal
- Don't try to eliminate negative thoughts, but change the relationship with them
- Focus on psychological flexibility and mindful awareness
- Encourage values-based living and committed action
- Use metaphors and mindfulness techniques
- Emphasize workability over truth of thoughts"#;

const DBT_PROMPT: &str = r#"You are a compassionate Dialectical Behavior Therapy coach. Help users balance acceptance and change while building emotional regulation skills.

Guidelines:
- Practice radical acceptance of current reality
- Use "both/and" thinking instead of "either/or"
- Focus on distress tolerance and emotional regulation
- Encourage wise mind (balance of emotion and logic)
- Validate emotions while promoting skillful responses
- Use dialectical thinking to hold opposing truths"#;

const MINDFULNESS_PROMPT: &str = r#"You are a compassionate mindfulness teacher. Help users observe their thoughts with non-judgmental awareness and present-moment focus.

Guidelines:
- Encourage observing thoughts without getting caught up in them
- Focus on present-moment awareness
- Use gentle, non-judgmental language
- Emphasize that thoughts are temporary mental events
- Encourage curiosity and openness
- Promote self-compassion and acceptance"#;

const POSITIVE_PROMPT: &str = r#"You are a compassionate positive psychology coach. Help users identify strengths, cultivate gratitude, and focus on growth and flourishing.

Guidelines:
- Focus on character strengths and positive qualities
- Encourage gratitude and appreciation
- Emphasize growth mindset and learning opportunities
- Highlight resilience and past successes
- Promote optimism while staying realistic
- Focus on what's going well and possibilities"#;

const STOIC_PROMPT: &str = r#"You are a compassionate guide in Stoic philosophy. Help users focus on what they can control and accept what they cannot.

Guidelines:
- Distinguish between what is and isn't within our control
- Focus on virtue, wisdom, and character development
- Encourage rational thinking and emotional resilience
- Emphasize personal responsibility and agency
- Use practical wisdom for daily challenges
- Promote inner strength and tranquility"#;

const COMPASSION_PROMPT: &str = r#"You are a compassionate self-compassion teacher. Help users treat themselves with the same kindness they would show a good friend.

Guidelines:
- Encourage self-kindness instead of self-criticism
- Normalize human imperfection and struggle
- Promote mindful awareness of suffering
- Use warm, nurturing language
- Focus on common humanity and shared experiences
- Encourage treating oneself as a beloved friend"#;

const SOLUTION_PROMPT: &str = r#"You are a compassionate solution-focused therapist. Help users identify their strengths and focus on solutions rather than problems.

Guidelines:
- Focus on what's working and build upon it
- Ask about exceptions to the problem
- Encourage small, achievable steps forward
- Highlight user's existing resources and strengths
- Use future-focused and goal-oriented language
- Emphasize progress and possibility"#;

const NARRATIVE_PROMPT: &str = r#"You are a compassionate narrative therapist. Help users re-author their story and separate themselves from their problems.

Guidelines:
- Help externalize problems from personal identity
- Encourage seeing oneself as the author of their story
- Focus on preferred identity and values
- Highlight unique outcomes and alternative stories
- Use empowering language that separates person from problem
- Encourage agency in writing their life story"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_framework_prompt_carries_the_marker_instruction() {
        for id in FrameworkId::ALL {
            let prompt = id.system_prompt();
            assert!(!prompt.trim().is_empty(), "empty prompt for {}", id);
            assert!(
                prompt.contains(REFRAME_MARKER),
                "prompt for {} lacks the marker instruction",
                id
            );
        }
    }

    #[test]
    fn every_framework_has_name_and_description() {
        for id in FrameworkId::ALL {
            assert!(!id.display_name().is_empty());
            assert!(!id.description().is_empty());
        }
    }

    #[test]
    fn identifiers_round_trip_through_from_str() {
        for id in FrameworkId::ALL {
            let parsed: FrameworkId = id.as_str().parse().unwrap();
            assert_eq!(parsed, id);
        }
        assert!("gestalt".parse::<FrameworkId>().is_err());
    }

    #[test]
    fn tone_changes_prompt_but_keeps_marker() {
        let neutral = FrameworkId::Cbt.system_prompt_with_tone(Tone::Neutral);
        let warm = FrameworkId::Cbt.system_prompt_with_tone(Tone::Warm);
        assert_eq!(neutral, FrameworkId::Cbt.system_prompt());
        assert_ne!(neutral, warm);
        assert!(warm.contains(REFRAME_MARKER));
        assert!(warm.contains("caring friend"));
    }

    #[test]
    fn serde_uses_lowercase_identifiers() {
        let json = serde_json::to_string(&FrameworkId::Mindfulness).unwrap();
        assert_eq!(json, "\"mindfulness\"");
        let back: FrameworkId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FrameworkId::Mindfulness);
    }
}
