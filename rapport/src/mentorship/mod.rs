//! Mentor/mentee compatibility
//!
//! Compares two independent agent profiles and explains the result, ranks
//! candidate mentors for a mentee, and tracks progress of a mentorship once
//! it starts. Everything here is a pure function of the input profiles.

pub mod compatibility;
pub mod focus;
pub mod profile;
pub mod ranking;
pub mod session;

pub use compatibility::{
    CompatibilityResult, CompatibilityScorer, Subscores, communication_style, personality_fit,
    score_compatibility,
};
pub use focus::{FocusArea, covered_weaknesses, strengths, weaknesses};
pub use profile::{AgentProfile, BigFive, LinguisticProfile, NEUTRAL_TRAIT, PsychometricProfile};
pub use ranking::{rank_mentors, rank_mentors_concurrent};
pub use session::{MentorshipSession, Objective};
