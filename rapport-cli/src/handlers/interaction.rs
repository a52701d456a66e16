//! Classify and record interactions

use crate::args::{ClassifyArgs, InteractArgs};
use crate::context::RapportCliContext;
use crate::output::*;
use colored::Colorize;
use rapport::sentiment::SentimentClassifier;

pub fn handle_classify(
    args: ClassifyArgs,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let classifier = SentimentClassifier::new(ctx.config.sentiment.keywords.clone());
    let descriptor = classifier.classify(&args.text_a, &args.text_b);

    if is_json(output_format) {
        print_json(&descriptor);
    } else {
        print_descriptor(&descriptor);
    }
    Ok(())
}

pub async fn handle_interact(
    args: InteractArgs,
    ctx: &RapportCliContext,
    output_format: &str,
) -> rapport::Result<()> {
    let outcome = ctx
        .manager
        .record_interaction(
            &args.agent_a,
            &args.agent_b,
            &args.text_a,
            &args.text_b,
            &args.context,
        )
        .await?;
    ctx.save().await?;

    if is_json(output_format) {
        print_json(&outcome);
        return Ok(());
    }

    if outcome.created {
        println!(
            "{}",
            format_success(&format!(
                "{} and {} met for the first time",
                args.agent_a, args.agent_b
            ))
        );
    } else {
        println!(
            "{}",
            format_success(&format!(
                "Recorded interaction between {} and {}",
                args.agent_a, args.agent_b
            ))
        );
    }
    if outcome.degraded_write {
        println!(
            "{}",
            format_warning("Stored without transactional guarantees after repeated conflicts")
        );
    }

    print_descriptor(&outcome.descriptor);
    println!();
    let trend = ctx
        .manager
        .trend(&args.agent_a, &args.agent_b)
        .await?;
    print_relationship(&outcome.relationship, trend, 0);
    println!(
        "\n{}",
        format!(
            "rapport-cli relationship show {} {}",
            args.agent_a, args.agent_b
        )
        .color(CliColors::muted())
    );
    Ok(())
}
