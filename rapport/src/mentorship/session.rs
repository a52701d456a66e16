//! Mentorship sessions and objective tracking

use super::compatibility::CompatibilityResult;
use super::focus::FocusArea;
use crate::{RapportError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub description: String,
    pub completed: bool,
}

/// A mentor working with a mentee on a set of focus areas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorshipSession {
    pub id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    pub focus_areas: Vec<FocusArea>,
    pub objectives: Vec<Objective>,
    pub started_at: DateTime<Utc>,
}

impl MentorshipSession {
    /// Start a session. Mentor and mentee must be different agents.
    pub fn new(
        mentor_id: impl Into<String>,
        mentee_id: impl Into<String>,
        focus_areas: Vec<FocusArea>,
    ) -> Result<Self> {
        let mentor_id = mentor_id.into();
        let mentee_id = mentee_id.into();
        if mentor_id == mentee_id {
            return Err(RapportError::SelfMatch { agent_id: mentor_id });
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            mentor_id,
            mentee_id,
            focus_areas,
            objectives: Vec::new(),
            started_at: Utc::now(),
        })
    }

    /// Start a session on the focus areas a compatibility check recommended
    pub fn from_compatibility(result: &CompatibilityResult) -> Result<Self> {
        Self::new(
            result.mentor_id.clone(),
            result.mentee_id.clone(),
            result.recommended_focus.clone(),
        )
    }

    pub fn with_objective(mut self, description: impl Into<String>) -> Self {
        self.add_objective(description);
        self
    }

    pub fn add_objective(&mut self, description: impl Into<String>) {
        self.objectives.push(Objective {
            description: description.into(),
            completed: false,
        });
    }

    /// Mark an objective as done. Returns false if there is no such objective.
    pub fn complete_objective(&mut self, index: usize) -> bool {
        match self.objectives.get_mut(index) {
            Some(objective) => {
                objective.completed = true;
                true
            }
            None => false,
        }
    }

    /// Share of objectives completed; 0 when there are none
    pub fn progress(&self) -> f64 {
        if self.objectives.is_empty() {
            return 0.0;
        }
        let done = self.objectives.iter().filter(|o| o.completed).count();
        done as f64 / self.objectives.len() as f64
    }

    pub fn is_complete(&self) -> bool {
        !self.objectives.is_empty() && self.objectives.iter().all(|o| o.completed)
    }
}
