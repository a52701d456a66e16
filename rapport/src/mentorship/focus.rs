//! Mentorship focus areas and strength/weakness extraction

use super::profile::AgentProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trait above this marks a strength
pub const STRENGTH_THRESHOLD: f64 = 0.6;

/// A trait below this marks a weakness
pub const WEAKNESS_THRESHOLD: f64 = 0.4;

/// Skill domain used to match mentor strengths with mentee weaknesses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Communication,
    EmotionalIntelligence,
    Knowledge,
    Creativity,
    Relationships,
    ProblemSolving,
}

impl FocusArea {
    pub const ALL: [FocusArea; 6] = [
        FocusArea::Communication,
        FocusArea::EmotionalIntelligence,
        FocusArea::Knowledge,
        FocusArea::Creativity,
        FocusArea::Relationships,
        FocusArea::ProblemSolving,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusArea::Communication => "communication",
            FocusArea::EmotionalIntelligence => "emotional_intelligence",
            FocusArea::Knowledge => "knowledge",
            FocusArea::Creativity => "creativity",
            FocusArea::Relationships => "relationships",
            FocusArea::ProblemSolving => "problem_solving",
        }
    }

    /// Trait names that express this area
    pub fn aliases(&self) -> [&'static str; 2] {
        match self {
            FocusArea::Communication => ["communication", "expressiveness"],
            FocusArea::EmotionalIntelligence => ["empathy", "emotional_awareness"],
            FocusArea::Knowledge => ["knowledge", "intelligence"],
            FocusArea::Creativity => ["creativity", "imagination"],
            FocusArea::Relationships => ["sociability", "friendliness"],
            FocusArea::ProblemSolving => ["analytical", "problem_solving"],
        }
    }

    /// Areas close enough that strength in one helps with the other
    pub fn adjacent(&self) -> [FocusArea; 2] {
        match self {
            FocusArea::Communication => [FocusArea::Relationships, FocusArea::EmotionalIntelligence],
            FocusArea::EmotionalIntelligence => [FocusArea::Relationships, FocusArea::Communication],
            FocusArea::Knowledge => [FocusArea::ProblemSolving, FocusArea::Creativity],
            FocusArea::Creativity => [FocusArea::ProblemSolving, FocusArea::Knowledge],
            FocusArea::Relationships => [FocusArea::Communication, FocusArea::EmotionalIntelligence],
            FocusArea::ProblemSolving => [FocusArea::Knowledge, FocusArea::Creativity],
        }
    }

    /// Same area, or adjacent to it
    pub fn overlaps(&self, other: FocusArea) -> bool {
        *self == other || self.adjacent().contains(&other)
    }

    /// Highest value among this area's alias traits
    pub fn best_score(&self, profile: &AgentProfile) -> f64 {
        self.aliases()
            .iter()
            .map(|name| profile.trait_value(name))
            .fold(f64::MIN, f64::max)
    }

    /// Lowest value among this area's alias traits
    pub fn worst_score(&self, profile: &AgentProfile) -> f64 {
        self.aliases()
            .iter()
            .map(|name| profile.trait_value(name))
            .fold(f64::MAX, f64::min)
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace(['-', ' '], "_");
        FocusArea::ALL
            .into_iter()
            .find(|area| area.as_str() == lower)
            .ok_or_else(|| format!("Unknown focus area: {}", s))
    }
}

/// Areas the agent is strong in, strongest first.
///
/// An agent with no strength above the threshold is assumed to be able to
/// share knowledge.
pub fn strengths(profile: &AgentProfile) -> Vec<FocusArea> {
    let mut scored: Vec<(FocusArea, f64)> = FocusArea::ALL
        .into_iter()
        .map(|area| (area, area.best_score(profile)))
        .filter(|(_, score)| *score > STRENGTH_THRESHOLD)
        .collect();

    if scored.is_empty() {
        return vec![FocusArea::Knowledge];
    }

    // Stable sort keeps declaration order among equal scores
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(area, _)| area).collect()
}

/// Areas the agent is weak in, in declaration order
pub fn weaknesses(profile: &AgentProfile) -> Vec<FocusArea> {
    FocusArea::ALL
        .into_iter()
        .filter(|area| area.worst_score(profile) < WEAKNESS_THRESHOLD)
        .collect()
}

/// Mentee weaknesses that some mentor strength covers, directly or through an
/// adjacent area
pub fn covered_weaknesses(mentor_strengths: &[FocusArea], mentee_weaknesses: &[FocusArea]) -> Vec<FocusArea> {
    mentee_weaknesses
        .iter()
        .copied()
        .filter(|weakness| mentor_strengths.iter().any(|s| s.overlaps(*weakness)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strengths_and_weaknesses() {
        let mentor = AgentProfile::new("m")
            .with_trait("empathy", 0.8)
            .with_trait("communication", 0.7);
        let mentee = AgentProfile::new("e")
            .with_trait("empathy", 0.3)
            .with_trait("communication", 0.2);

        assert_eq!(
            strengths(&mentor),
            vec![FocusArea::EmotionalIntelligence, FocusArea::Communication]
        );
        assert_eq!(
            weaknesses(&mentee),
            vec![FocusArea::Communication, FocusArea::EmotionalIntelligence]
        );
    }

    #[test]
    fn test_no_strengths_defaults_to_knowledge() {
        assert_eq!(strengths(&AgentProfile::new("blank")), vec![FocusArea::Knowledge]);
    }

    #[test]
    fn test_missing_traits_are_not_weaknesses() {
        assert!(weaknesses(&AgentProfile::new("blank")).is_empty());
    }

    #[test]
    fn test_either_alias_counts() {
        let profile = AgentProfile::new("p")
            .with_trait("imagination", 0.9)
            .with_trait("friendliness", 0.1);
        assert_eq!(strengths(&profile), vec![FocusArea::Creativity]);
        assert_eq!(weaknesses(&profile), vec![FocusArea::Relationships]);
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        for area in FocusArea::ALL {
            for other in area.adjacent() {
                assert!(other.overlaps(area), "{} -> {}", area, other);
            }
            assert!(area.overlaps(area));
        }
        assert!(!FocusArea::Communication.overlaps(FocusArea::Knowledge));
    }

    #[test]
    fn test_covered_weaknesses_uses_adjacency() {
        let covered = covered_weaknesses(
            &[FocusArea::Knowledge],
            &[FocusArea::ProblemSolving, FocusArea::Relationships],
        );
        assert_eq!(covered, vec![FocusArea::ProblemSolving]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Problem Solving".parse::<FocusArea>().unwrap(), FocusArea::ProblemSolving);
        assert_eq!("emotional-intelligence".parse::<FocusArea>().unwrap(), FocusArea::EmotionalIntelligence);
        assert!("cooking".parse::<FocusArea>().is_err());
    }
}
