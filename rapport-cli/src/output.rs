use colored::*;
use rapport::RapportError;
use rapport::mentorship::CompatibilityResult;
use rapport::relationships::{
    AgentRelationship, RelationshipStatus, TrendDirection,
};
use rapport::sentiment::{InteractionDescriptor, Sentiment};
use serde::Serialize;
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }
}

pub fn is_json(output_format: &str) -> bool {
    output_format.eq_ignore_ascii_case("json")
}

/// Pretty-print any serializable value as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Output a RapportError in the requested format
pub fn output_error(error: &RapportError, output_format: &str) {
    if is_json(output_format) {
        let code = match error {
            RapportError::Configuration(_) => "CONFIGURATION_ERROR",
            RapportError::Logging(_) => "LOGGING_ERROR",
            RapportError::Storage(_) => "STORAGE_ERROR",
            RapportError::SelfMatch { .. } => "SELF_MATCH",
            RapportError::SelfRelationship { .. } => "SELF_RELATIONSHIP",
            RapportError::InvalidAgentId(_) => "INVALID_AGENT_ID",
            RapportError::InvalidProfile(_) => "INVALID_PROFILE",
            RapportError::RelationshipNotFound { .. } => "RELATIONSHIP_NOT_FOUND",
            RapportError::Other(_) => "ERROR",
        };
        let error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        print_json(&error_response);
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_sentiment(sentiment: Sentiment) -> ColoredString {
    let label = sentiment.to_string();
    match sentiment {
        Sentiment::Positive => label.color(CliColors::success()),
        Sentiment::Negative => label.color(CliColors::error()),
        Sentiment::Neutral => label.color(CliColors::muted()),
    }
}

pub fn format_status(status: RelationshipStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        RelationshipStatus::Growing => label.color(CliColors::success()),
        RelationshipStatus::Declining => label.color(CliColors::warning()),
        RelationshipStatus::Stable => label.color(CliColors::info()),
        RelationshipStatus::Broken => label.color(CliColors::error()).bold(),
    }
}

pub fn format_trend(trend: TrendDirection) -> ColoredString {
    let label = trend.to_string();
    match trend {
        TrendDirection::Improving => label.color(CliColors::success()),
        TrendDirection::Stable => label.color(CliColors::info()),
        TrendDirection::Declining => label.color(CliColors::warning()),
    }
}

/// Ten-cell bar for a value in `[0, 1]`
pub fn format_bar(value: f64) -> String {
    let filled = (value.clamp(0.0, 1.0) * 10.0).round() as usize;
    format!("{}{} {:.2}", "█".repeat(filled), "░".repeat(10 - filled), value)
}

pub fn print_descriptor(descriptor: &InteractionDescriptor) {
    println!(
        "{}",
        "━━━ Interaction ━━━".color(CliColors::info()).bold()
    );
    println!(
        "{}: {}",
        "Sentiment".color(CliColors::muted()),
        format_sentiment(descriptor.sentiment)
    );
    println!(
        "{}: {}",
        "Event".color(CliColors::muted()),
        descriptor.event_kind.to_string().color(CliColors::accent())
    );
    println!(
        "{}: {}",
        "Intensity".color(CliColors::muted()),
        format_bar(descriptor.intensity)
    );
}

pub fn print_relationship(relationship: &AgentRelationship, trend: TrendDirection, events: usize) {
    println!(
        "{}",
        "━━━ Relationship Details ━━━".color(CliColors::info()).bold()
    );
    println!(
        "{}: {}",
        "Pair".color(CliColors::muted()),
        relationship.id.color(CliColors::accent()).bold()
    );
    let tags = relationship
        .type_tags
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}: {}",
        "Type".color(CliColors::muted()),
        tags.color(CliColors::primary())
    );
    println!(
        "{}: {}   {}: {}",
        "Status".color(CliColors::muted()),
        format_status(relationship.status),
        "Trend".color(CliColors::muted()),
        format_trend(trend)
    );

    let m = &relationship.metrics;
    for (name, value) in [
        ("Trust", m.trust),
        ("Respect", m.respect),
        ("Affection", m.affection),
        ("Familiarity", m.familiarity),
    ] {
        println!("  {:<12} {}", name.color(CliColors::muted()), format_bar(value));
    }

    println!(
        "{}: {}",
        "Interactions".color(CliColors::muted()),
        relationship.interaction_count
    );
    println!(
        "{}: {}",
        "First met".color(CliColors::muted()),
        relationship
            .first_meeting_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .color(CliColors::primary())
    );
    println!(
        "{}: {}",
        "Last interaction".color(CliColors::muted()),
        relationship
            .last_interaction_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .color(CliColors::primary())
    );

    if events > 0 && !relationship.events.is_empty() {
        println!();
        println!("{}", "Recent events:".color(CliColors::muted()).bold());
        for event in relationship.recent_events(events) {
            let delta = event.metric_deltas.trust;
            let delta = if delta >= 0.0 {
                format!("+{:.3}", delta).color(CliColors::success())
            } else {
                format!("{:.3}", delta).color(CliColors::error())
            };
            println!(
                "  {} {:<15} trust {}  {}",
                event.timestamp.format("%Y-%m-%d %H:%M").to_string().color(CliColors::muted()),
                event.kind.to_string(),
                delta,
                event.description
            );
        }
    }
}

pub fn print_relationship_list(relationships: &[AgentRelationship]) {
    if relationships.is_empty() {
        println!("{}", format_info("No relationships found."));
        return;
    }

    println!(
        "{}",
        format_info(&format!("Found {} relationships:", relationships.len()))
    );
    println!();

    println!(
        "{:<32} {:<10} {:<7} {:<7} {:<9} {:<12} {}",
        "Pair".color(CliColors::muted()).bold(),
        "Status".color(CliColors::muted()).bold(),
        "Trust".color(CliColors::muted()).bold(),
        "Respect".color(CliColors::muted()).bold(),
        "Affection".color(CliColors::muted()).bold(),
        "Familiarity".color(CliColors::muted()).bold(),
        "Type".color(CliColors::muted()).bold()
    );

    for rel in relationships {
        let tags = rel
            .type_tags
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{:<32} {:<10} {:<7.2} {:<7.2} {:<9.2} {:<12.2} {}",
            rel.id.color(CliColors::accent()),
            format_status(rel.status),
            rel.metrics.trust,
            rel.metrics.respect,
            rel.metrics.affection,
            rel.metrics.familiarity,
            tags
        );
    }
}

pub fn print_compatibility(result: &CompatibilityResult) {
    println!(
        "{}",
        format!("━━━ {} → {} ━━━", result.mentor_id, result.mentee_id)
            .color(CliColors::info())
            .bold()
    );
    println!(
        "{}: {}",
        "Overall".color(CliColors::muted()),
        format_bar(result.overall_score).bold()
    );
    for (name, value) in [
        ("Skill match", result.subscores.skill_match),
        ("Personality", result.subscores.personality_fit),
        ("Communication", result.subscores.communication_style),
        ("Availability", result.subscores.availability),
    ] {
        println!("  {:<14} {}", name.color(CliColors::muted()), format_bar(value));
    }

    let focus = result
        .recommended_focus
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}: {}",
        "Focus".color(CliColors::muted()),
        focus.color(CliColors::accent())
    );
    println!("{}: {}", "Reason".color(CliColors::muted()), result.reason);
    for challenge in &result.challenges {
        println!("{}", format_warning(challenge));
    }
}

pub fn print_ranking(mentee: &str, results: &[CompatibilityResult]) {
    if results.is_empty() {
        println!("{}", format_info("No suitable mentors found."));
        return;
    }

    println!(
        "{}",
        format_info(&format!("Top {} mentors for {}:", results.len(), mentee))
    );
    println!();
    println!(
        "{:<4} {:<24} {:<8} {:<8} {:<8} {}",
        "#".color(CliColors::muted()).bold(),
        "Mentor".color(CliColors::muted()).bold(),
        "Overall".color(CliColors::muted()).bold(),
        "Skill".color(CliColors::muted()).bold(),
        "Fit".color(CliColors::muted()).bold(),
        "Focus".color(CliColors::muted()).bold()
    );

    for (rank, result) in results.iter().enumerate() {
        let focus = result
            .recommended_focus
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<4} {:<24} {:<8.3} {:<8.2} {:<8.2} {}",
            rank + 1,
            result.mentor_id.color(CliColors::accent()),
            result.overall_score,
            result.subscores.skill_match,
            result.subscores.personality_fit,
            focus
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bar() {
        colored::control::set_override(false);
        assert_eq!(format_bar(0.0), "░░░░░░░░░░ 0.00");
        assert_eq!(format_bar(1.0), "██████████ 1.00");
        assert_eq!(format_bar(0.54), "█████░░░░░ 0.54");
    }

    #[test]
    fn test_is_json() {
        assert!(is_json("json"));
        assert!(is_json("JSON"));
        assert!(!is_json("table"));
    }
}
