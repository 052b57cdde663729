//! Normalizes raw model output into a canonical reframe record.
//!
//! Two branches: split on the trailing marker line when the model followed
//! its instructions, otherwise fall back to a fixed keyword table over the
//! original thought. Normalization is total; malformed model output never
//! becomes a failure.

use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical pair extracted from one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReframe {
    pub reframed_thought: String,
    pub supportive_passage: String,
}

// Trailing marker with the reframe quoted, tolerating whitespace after it.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\*\*Reframed thought:\*\*\s*"([^"]*)"\s*$"#).expect("marker regex is valid")
});

/// Keyword rules for the fallback reframe, checked in order; the first
/// rule with any keyword present in the lowercased thought wins. The order
/// is part of the contract and must not be reshuffled.
const FALLBACK_RULES: &[(&[&str], &str)] = &[
    (
        &["can't", "cannot"],
        "I'm learning and growing with each step I take",
    ),
    (
        &["terrible", "awful", "horrible"],
        "I'm human and I'm doing my best in this moment",
    ),
    (
        &["never", "always"],
        "Every situation is different and I can learn from this",
    ),
    (
        &["nobody", "no one"],
        "I am worthy of connection and there are people who care",
    ),
    (
        &["stupid", "dumb", "idiot"],
        "I'm intelligent in my own way and I'm constantly learning",
    ),
    (
        &["failure", "fail"],
        "Every setback is a setup for a comeback and growth",
    ),
];

const FALLBACK_DEFAULT: &str = "I choose to see this challenge as an opportunity to grow";

// Stand-in when the model emitted a marker with nothing before it, so the
// supportive side of the record is never blank.
const EMPTY_SUPPORT: &str =
    "Your feelings are valid, and taking the time to reframe this thought is a real step forward.";

/// Parse raw model output into the canonical reframe pair.
///
/// Total over all string inputs: both returned fields are guaranteed
/// non-empty even for empty or malformed `raw`.
pub fn normalize(raw: &str, original_thought: &str) -> NormalizedReframe {
    if let Some(caps) = MARKER_RE.captures(raw) {
        let reframed = caps
            .get(1)
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        if !reframed.is_empty() {
            let marker_start = caps.get(0).map(|m| m.start()).unwrap_or(raw.len());
            let supportive = raw[..marker_start].trim();
            return NormalizedReframe {
                reframed_thought: reframed.to_string(),
                supportive_passage: if supportive.is_empty() {
                    EMPTY_SUPPORT.to_string()
                } else {
                    supportive.to_string()
                },
            };
        }
    }

    let supportive = raw.trim();
    NormalizedReframe {
        reframed_thought: fallback_reframe(original_thought).to_string(),
        supportive_passage: if supportive.is_empty() {
            EMPTY_SUPPORT.to_string()
        } else {
            supportive.to_string()
        },
    }
}

/// Rule-based reframe used when the model skipped the marker line.
pub fn fallback_reframe(original_thought: &str) -> &'static str {
    let thought = original_thought.to_lowercase();
    for (keywords, reframe) in FALLBACK_RULES {
        if keywords.iter().any(|kw| thought.contains(kw)) {
            return reframe;
        }
    }
    FALLBACK_DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_supportive_text_from_trailing_marker() {
        let raw = "It sounds like this has been weighing on you.\n\n**Reframed thought:** \"I am more capable than this moment suggests\"";
        let out = normalize(raw, "I'm useless");
        assert_eq!(out.reframed_thought, "I am more capable than this moment suggests");
        assert_eq!(
            out.supportive_passage,
            "It sounds like this has been weighing on you."
        );
    }

    #[test]
    fn tolerates_trailing_whitespace_after_marker() {
        let raw = "Support text.\n\n**Reframed thought:** \"A calmer view\"  \n";
        let out = normalize(raw, "whatever");
        assert_eq!(out.reframed_thought, "A calmer view");
        assert_eq!(out.supportive_passage, "Support text.");
    }

    #[test]
    fn ignores_marker_in_the_middle_of_the_text() {
        // Only a trailing marker counts as structured output.
        let raw = "**Reframed thought:** \"early\" and then more prose after it";
        let out = normalize(raw, "I can't cope");
        assert_eq!(out.reframed_thought, "I'm learning and growing with each step I take");
        assert_eq!(out.supportive_passage, raw);
    }

    #[test]
    fn fallback_is_deterministic_for_cant() {
        for _ in 0..3 {
            let out = normalize("irrelevant text with no marker", "I can't do this");
            assert_eq!(
                out.reframed_thought,
                "I'm learning and growing with each step I take"
            );
            assert_eq!(out.supportive_passage, "irrelevant text with no marker");
        }
    }

    #[test]
    fn fallback_priority_order_is_fixed() {
        // "always" (rule 3) outranks "fail" (rule 6).
        assert_eq!(
            fallback_reframe("I always fail at everything"),
            "Every situation is different and I can learn from this"
        );
        // "terrible" (rule 2) outranks "nobody" (rule 4).
        assert_eq!(
            fallback_reframe("I'm terrible and nobody likes me"),
            "I'm human and I'm doing my best in this moment"
        );
        assert_eq!(
            fallback_reframe("nothing matches here"),
            "I choose to see this challenge as an opportunity to grow"
        );
    }

    #[test]
    fn total_over_empty_and_malformed_input() {
        let out = normalize("", "");
        assert!(!out.reframed_thought.is_empty());
        assert!(!out.supportive_passage.is_empty());

        // Marker present but the quoted content is blank: fall through.
        let out = normalize("**Reframed thought:** \"\"", "I feel stupid");
        assert_eq!(
            out.reframed_thought,
            "I'm intelligent in my own way and I'm constantly learning"
        );
        assert!(!out.supportive_passage.is_empty());
    }

    #[test]
    fn marker_only_response_still_yields_support_text() {
        let out = normalize("**Reframed thought:** \"Short and sweet\"", "meh");
        assert_eq!(out.reframed_thought, "Short and sweet");
        assert!(!out.supportive_passage.is_empty());
    }
}
