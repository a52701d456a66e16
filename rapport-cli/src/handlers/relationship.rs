//! Relationship command handlers

use crate::commands::RelationshipCommands;
use crate::context::RapportCliContext;
use crate::output::*;
use crate::utils::parse_relationship_type;
use rapport::storage::RelationshipStore;
use serde_json::json;

pub async fn handle_relationship_command(
    cmd: RelationshipCommands,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    match cmd {
        RelationshipCommands::Show(args) => {
            let relationship = ctx
                .manager
                .require_relationship(&args.agent_a, &args.agent_b)
                .await?;
            let trend = ctx.manager.trend(&args.agent_a, &args.agent_b).await?;

            if is_json(output_format) {
                let mut value = serde_json::to_value(&relationship).unwrap_or_default();
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("trend".to_string(), json!(trend));
                }
                print_json(&value);
            } else {
                print_relationship(&relationship, trend, args.events);
            }
        }

        RelationshipCommands::List(args) => {
            let tag = args.tag.as_deref().map(parse_relationship_type).transpose()?;

            let mut relationships = match &args.agent {
                Some(agent) => ctx.manager.relationships_for(agent).await?,
                None => ctx.store.list_relationships().await?,
            };
            if let Some(tag) = tag {
                relationships.retain(|r| r.has_tag(tag));
            }
            relationships.sort_by(|a, b| b.last_interaction_at.cmp(&a.last_interaction_at));
            relationships.truncate(args.limit);

            if is_json(output_format) {
                print_json(&relationships);
            } else {
                print_relationship_list(&relationships);
            }
        }

        RelationshipCommands::Trend(args) => {
            let trend = ctx.manager.trend(&args.agent_a, &args.agent_b).await?;
            if is_json(output_format) {
                print_json(&json!({
                    "agent_a": args.agent_a,
                    "agent_b": args.agent_b,
                    "trend": trend,
                }));
            } else {
                println!(
                    "{} ↔ {}: {}",
                    args.agent_a,
                    args.agent_b,
                    format_trend(trend)
                );
            }
        }

        RelationshipCommands::Summary(args) => {
            let summary = ctx
                .manager
                .relationship_summary(&args.agent_a, &args.agent_b)
                .await?;
            if is_json(output_format) {
                print_json(&json!({ "summary": summary }));
            } else {
                println!("{}", summary);
            }
        }
    }

    Ok(())
}
