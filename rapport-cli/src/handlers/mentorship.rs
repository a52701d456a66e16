//! Mentor matching handlers

use crate::commands::MatchCommands;
use crate::context::RapportCliContext;
use crate::output::*;
use crate::utils::{find_profile, load_profiles};
use rapport::mentorship::{CompatibilityScorer, rank_mentors_concurrent};
use std::sync::Arc;
use tracing::debug;

pub async fn handle_match_command(
    cmd: MatchCommands,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let scorer = CompatibilityScorer::new(ctx.config.compatibility.clone());

    match cmd {
        MatchCommands::Score(args) => {
            let profiles = load_profiles(&args.profiles)?;
            let mentor = find_profile(&profiles, &args.mentor)?;
            let mentee = find_profile(&profiles, &args.mentee)?;
            let result = scorer.score(mentor, mentee)?;

            if is_json(output_format) {
                print_json(&result);
            } else {
                print_compatibility(&result);
            }
        }

        MatchCommands::Rank(args) => {
            let profiles = load_profiles(&args.profiles)?;
            let mentee = find_profile(&profiles, &args.mentee)?.clone();
            debug!(
                mentee = %mentee.id,
                candidates = profiles.len().saturating_sub(1),
                concurrent = args.concurrent,
                "Ranking mentors"
            );

            let results = if args.concurrent {
                rank_mentors_concurrent(Arc::new(scorer), Arc::new(mentee.clone()), profiles, args.top)
                    .await?
            } else {
                scorer.rank(&mentee, &profiles, args.top)?
            };

            if is_json(output_format) {
                print_json(&results);
            } else {
                print_ranking(&mentee.id, &results);
            }
        }
    }

    Ok(())
}
