//! Agent profiles as consumed by compatibility scoring

use crate::relationships::clamp_unit;
use crate::{RapportError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Value assumed for a trait the profile does not carry
pub const NEUTRAL_TRAIT: f64 = 0.5;

/// Read model of an agent: trait maps plus optional style/personality data.
///
/// Field names follow the camelCase shape other services publish
/// (`coreTraits`, `dynamicTraits`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentProfile {
    pub id: String,

    /// Stable traits, `[0, 1]`
    pub core_traits: HashMap<String, f64>,

    /// Traits learned from recent behaviour. These take precedence over core
    /// traits of the same name.
    pub dynamic_traits: HashMap<String, f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linguistic_profile: Option<LinguisticProfile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub psychometric_profile: Option<PsychometricProfile>,
}

impl AgentProfile {
    /// Create an empty profile
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set a core trait
    pub fn with_trait(mut self, name: impl Into<String>, value: f64) -> Self {
        self.core_traits.insert(name.into(), value);
        self
    }

    /// Set a dynamic trait
    pub fn with_dynamic_trait(mut self, name: impl Into<String>, value: f64) -> Self {
        self.dynamic_traits.insert(name.into(), value);
        self
    }

    /// Attach a linguistic profile
    pub fn with_linguistic_profile(mut self, formality: f64, verbosity: f64) -> Self {
        self.linguistic_profile = Some(LinguisticProfile::new(formality, verbosity));
        self
    }

    /// Attach Big Five scores
    pub fn with_big_five(mut self, big_five: BigFive) -> Self {
        self.psychometric_profile = Some(PsychometricProfile { big_five });
        self
    }

    /// Look up a trait, dynamic first, then core, then [`NEUTRAL_TRAIT`]
    pub fn trait_value(&self, name: &str) -> f64 {
        self.dynamic_traits
            .get(name)
            .or_else(|| self.core_traits.get(name))
            .map(|v| if v.is_nan() { NEUTRAL_TRAIT } else { clamp_unit(*v) })
            .unwrap_or(NEUTRAL_TRAIT)
    }

    /// Big Five scores, if the profile carries them
    pub fn big_five(&self) -> Option<&BigFive> {
        self.psychometric_profile.as_ref().map(|p| &p.big_five)
    }

    /// Reject profiles that cannot be identified
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(RapportError::InvalidProfile(
                "agent profile has an empty id".to_string(),
            ));
        }
        Ok(())
    }
}

/// How an agent writes. Only formality and verbosity are compared; anything
/// else the publisher includes is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinguisticProfile {
    #[serde(deserialize_with = "deserialize_unit")]
    pub formality: f64,

    #[serde(deserialize_with = "deserialize_unit")]
    pub verbosity: f64,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for LinguisticProfile {
    fn default() -> Self {
        Self::new(NEUTRAL_TRAIT, NEUTRAL_TRAIT)
    }
}

impl LinguisticProfile {
    pub fn new(formality: f64, verbosity: f64) -> Self {
        Self {
            formality: clamp_unit(formality),
            verbosity: clamp_unit(verbosity),
            extra: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PsychometricProfile {
    pub big_five: BigFive,
}

/// Big Five personality scores, `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BigFive {
    #[serde(deserialize_with = "deserialize_unit")]
    pub openness: f64,
    #[serde(deserialize_with = "deserialize_unit")]
    pub conscientiousness: f64,
    #[serde(deserialize_with = "deserialize_unit")]
    pub extraversion: f64,
    #[serde(deserialize_with = "deserialize_unit")]
    pub agreeableness: f64,
    #[serde(deserialize_with = "deserialize_unit")]
    pub neuroticism: f64,
}

impl Default for BigFive {
    fn default() -> Self {
        Self {
            openness: NEUTRAL_TRAIT,
            conscientiousness: NEUTRAL_TRAIT,
            extraversion: NEUTRAL_TRAIT,
            agreeableness: NEUTRAL_TRAIT,
            neuroticism: NEUTRAL_TRAIT,
        }
    }
}

/// Deserialize a score, clamping to `[0, 1]`.
///
/// Non-numeric values fall back to the neutral score. The value is read
/// whole first so that a malformed score never desyncs the rest of the input.
fn deserialize_unit<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value.as_f64() {
        Some(raw) if raw.is_finite() => raw.clamp(0.0, 1.0),
        _ => NEUTRAL_TRAIT,
    })
}
