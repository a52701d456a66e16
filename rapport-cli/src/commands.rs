//! Command enum definitions
//!
//! This module contains the top-level parser and all CLI command enums.

use crate::args::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rapport-cli")]
#[command(about = "Score interactions, relationships and mentor matches between agents", long_about = None)]
#[command(version = rapport::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file holding relationship records; created on first write
    #[arg(long, short, global = true, env = "RAPPORT_STORE")]
    pub store: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    pub output: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Run diagnostic checks
    Diagnose,

    /// Classify an exchange between two agents without recording it
    #[command(long_about = r#"
Classify the tone of an exchange from what each agent said. Nothing is stored.

Keyword hits across both texts decide the sentiment (positive, negative,
neutral), an intensity between 0 and 1, and the event kind (help, agreement,
bonding, disagreement, conflict).

EXAMPLES:
  rapport-cli classify "Thanks for the help!" "Happy to help"
  rapport-cli classify "You are wrong" "I disagree" --output json
"#)]
    Classify(ClassifyArgs),

    /// Record an interaction and update the agents' relationship
    #[command(
        alias = "record",
        long_about = r#"
Classify an exchange and apply it to the relationship between two agents. The
relationship is created on first contact. Agent order does not matter: one
record is kept per pair.

EXAMPLES:
  rapport-cli --store team.json interact ada grace \
      --a-says "Thank you for the review" --b-says "Glad to help" \
      --context "code review"

RELATED COMMANDS:
  • rapport-cli relationship show <a> <b> - Inspect the updated relationship
"#
    )]
    Interact(InteractArgs),

    /// Relationship inspection commands
    #[command(subcommand, alias = "rel")]
    Relationship(RelationshipCommands),

    /// Mentor/mentee compatibility commands
    #[command(subcommand)]
    Match(MatchCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum RelationshipCommands {
    /// Show the relationship between two agents
    #[command(alias = "get")]
    Show(ShowRelationshipArgs),

    /// List stored relationships
    List(ListRelationshipsArgs),

    /// Show the recent trend of a relationship
    Trend(PairArgs),

    /// One-line summary of a relationship
    Summary(PairArgs),
}

#[derive(Subcommand, Debug)]
pub enum MatchCommands {
    /// Score one mentor against one mentee
    Score(ScoreArgs),

    /// Rank every other profile as a mentor for a mentee
    Rank(RankArgs),
}
