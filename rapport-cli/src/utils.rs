use rapport::RapportError;
use rapport::mentorship::AgentProfile;
use rapport::relationships::RelationshipType;
use std::path::Path;

pub fn parse_relationship_type(type_str: &str) -> rapport::Result<RelationshipType> {
    match type_str.to_lowercase().as_str() {
        "acquaintance" => Ok(RelationshipType::Acquaintance),
        "friendship" | "friend" => Ok(RelationshipType::Friendship),
        "rivalry" | "rival" => Ok(RelationshipType::Rivalry),
        "professional" => Ok(RelationshipType::Professional),
        "mentorship" => Ok(RelationshipType::Mentorship),
        _ => Err(RapportError::Other(format!(
            "Invalid relationship type: {}",
            type_str
        ))),
    }
}

/// Read a JSON array of agent profiles
pub fn load_profiles(path: &Path) -> rapport::Result<Vec<AgentProfile>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RapportError::Other(format!(
            "Failed to read profiles from {}: {}",
            path.display(),
            e
        ))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        RapportError::InvalidProfile(format!("{}: {}", path.display(), e))
    })
}

pub fn find_profile<'a>(profiles: &'a [AgentProfile], id: &str) -> rapport::Result<&'a AgentProfile> {
    profiles.iter().find(|p| p.id == id).ok_or_else(|| {
        let known: Vec<&str> = profiles.iter().take(5).map(|p| p.id.as_str()).collect();
        RapportError::InvalidProfile(format!(
            "No profile with id '{}' (known: {})",
            id,
            known.join(", ")
        ))
    })
}
