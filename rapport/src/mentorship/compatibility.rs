//! Mentor/mentee compatibility scoring

use super::focus::{FocusArea, covered_weaknesses, strengths, weaknesses};
use super::profile::{AgentProfile, BigFive};
use crate::config::CompatibilityConfig;
use crate::relationships::clamp_unit;
use crate::{RapportError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Skill match gained per covered mentee weakness
const SKILL_MATCH_PER_OVERLAP: f64 = 0.25;

/// Subscores above this read as a positive signal in the reason
const GOOD_SCORE: f64 = 0.6;

/// Subscores below this are flagged as a challenge
const WEAK_SCORE: f64 = 0.4;

/// Skill match below this is flagged as a challenge
const WEAK_SKILL_MATCH: f64 = 0.3;

/// The four components the overall score is weighted from, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscores {
    pub skill_match: f64,
    pub personality_fit: f64,
    pub communication_style: f64,
    /// Supplied by configuration; scheduling data is not modelled
    pub availability: f64,
}

/// Outcome of scoring one mentor against one mentee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub mentor_id: String,
    pub mentee_id: String,
    pub overall_score: f64,
    pub subscores: Subscores,
    pub recommended_focus: Vec<FocusArea>,
    pub challenges: Vec<String>,
    pub reason: String,
}

/// Scores mentor/mentee pairs
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    config: CompatibilityConfig,
}

impl CompatibilityScorer {
    pub fn new(config: CompatibilityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompatibilityConfig {
        &self.config
    }

    /// Score how well `mentor` would mentor `mentee`.
    ///
    /// Fails only when either profile has no id or both name the same agent.
    pub fn score(&self, mentor: &AgentProfile, mentee: &AgentProfile) -> Result<CompatibilityResult> {
        mentor.validate()?;
        mentee.validate()?;
        if mentor.id == mentee.id {
            return Err(RapportError::SelfMatch {
                agent_id: mentor.id.clone(),
            });
        }

        let mentor_strengths = strengths(mentor);
        let mentee_weaknesses = weaknesses(mentee);
        let covered = covered_weaknesses(&mentor_strengths, &mentee_weaknesses);

        let skill_match = (covered.len() as f64 * SKILL_MATCH_PER_OVERLAP).min(1.0);
        let personality_fit = personality_fit(mentor, mentee);
        let communication_style = communication_style(mentor, mentee);
        let availability = clamp_unit(self.config.availability);

        let weights = &self.config.weights;
        let overall_score = clamp_unit(
            weights.skill_match * skill_match
                + weights.personality_fit * personality_fit
                + weights.communication_style * communication_style
                + weights.availability * availability,
        );

        let recommended_focus: Vec<FocusArea> = if covered.is_empty() {
            mentor_strengths.iter().copied().take(2).collect()
        } else {
            covered
                .into_iter()
                .take(self.config.max_recommended_focus)
                .collect()
        };

        let challenges = challenges(skill_match, personality_fit, communication_style);
        let reason = reason(skill_match, personality_fit, communication_style, &recommended_focus);

        debug!(
            mentor = %mentor.id,
            mentee = %mentee.id,
            overall_score,
            skill_match,
            personality_fit,
            communication_style,
            "Scored compatibility"
        );

        Ok(CompatibilityResult {
            mentor_id: mentor.id.clone(),
            mentee_id: mentee.id.clone(),
            overall_score,
            subscores: Subscores {
                skill_match,
                personality_fit,
                communication_style,
                availability,
            },
            recommended_focus,
            challenges,
            reason,
        })
    }
}

/// Score a mentor/mentee pair with the default weights
pub fn score_compatibility(mentor: &AgentProfile, mentee: &AgentProfile) -> Result<CompatibilityResult> {
    CompatibilityScorer::default().score(mentor, mentee)
}

/// Personality fit from Big Five data when both sides have it, otherwise from
/// a handful of plain traits
pub fn personality_fit(mentor: &AgentProfile, mentee: &AgentProfile) -> f64 {
    match (mentor.big_five(), mentee.big_five()) {
        (Some(mentor_b5), Some(mentee_b5)) => big_five_fit(mentor_b5, mentee_b5),
        _ => trait_fit(mentor, mentee),
    }
}

fn big_five_fit(mentor: &BigFive, mentee: &BigFive) -> f64 {
    let mut score = 0.5;

    // An open mentor stretches a less open mentee
    if mentor.openness > 0.6 && mentee.openness < 0.5 {
        score += 0.1;
    }
    score += (1.0 - (mentor.conscientiousness - mentee.conscientiousness).abs()) * 0.15;
    if mentor.extraversion > 0.5 {
        score += 0.1;
    }
    if mentor.agreeableness > 0.6 {
        score += 0.1;
    }
    if mentor.neuroticism < 0.4 {
        score += 0.1;
    }

    clamp_unit(score)
}

fn trait_fit(mentor: &AgentProfile, mentee: &AgentProfile) -> f64 {
    let mut score = 0.5;

    let supportive = mentor
        .trait_value("patience")
        .max(mentor.trait_value("helpfulness"));
    if supportive > 0.6 {
        score += 0.15;
    }
    if mentee.trait_value("curiosity") > 0.5 {
        score += 0.1;
    }
    if mentor.trait_value("knowledge") - mentee.trait_value("knowledge") > 0.2 {
        score += 0.15;
    }

    clamp_unit(score)
}

/// Similarity of writing style, neutral when either side has no linguistic profile
pub fn communication_style(mentor: &AgentProfile, mentee: &AgentProfile) -> f64 {
    match (&mentor.linguistic_profile, &mentee.linguistic_profile) {
        (Some(a), Some(b)) => {
            let formality = (a.formality - b.formality).abs();
            let verbosity = (a.verbosity - b.verbosity).abs();
            clamp_unit(1.0 - (formality + verbosity) / 2.0)
        }
        _ => 0.5,
    }
}

fn challenges(skill_match: f64, personality_fit: f64, communication_style: f64) -> Vec<String> {
    let mut challenges = Vec::new();
    if personality_fit < WEAK_SCORE {
        challenges.push("Personality styles may clash; agree on working norms early".to_string());
    }
    if communication_style < WEAK_SCORE {
        challenges.push("Communication styles differ significantly".to_string());
    }
    if skill_match < WEAK_SKILL_MATCH {
        challenges.push("Limited overlap between mentor strengths and mentee growth areas".to_string());
    }
    challenges
}

fn bucket<'a>(score: f64, good: &'a str, fair: &'a str, poor: &'a str) -> &'a str {
    if score > GOOD_SCORE {
        good
    } else if score < WEAK_SCORE {
        poor
    } else {
        fair
    }
}

fn reason(
    skill_match: f64,
    personality_fit: f64,
    communication_style: f64,
    recommended_focus: &[FocusArea],
) -> String {
    let mut parts = vec![
        bucket(
            skill_match,
            "Strong skill complementarity",
            "Some skill complementarity",
            "Little skill complementarity",
        ),
        bucket(
            personality_fit,
            "good personality fit",
            "workable personality fit",
            "uneasy personality fit",
        ),
        bucket(
            communication_style,
            "compatible communication styles",
            "moderately aligned communication styles",
            "mismatched communication styles",
        ),
    ]
    .join(", ");

    if !recommended_focus.is_empty() {
        let focus = recommended_focus
            .iter()
            .map(|area| area.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        parts.push_str(&format!(". Recommended focus: {}", focus));
    }
    parts
}
