//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command category.

use clap::Args;
use std::path::PathBuf;

// Interaction command arguments
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// What the first agent said
    pub text_a: String,

    /// What the second agent said
    pub text_b: String,
}

#[derive(Args, Debug)]
pub struct InteractArgs {
    /// First agent id
    pub agent_a: String,

    /// Second agent id
    pub agent_b: String,

    /// What the first agent said
    #[arg(long = "a-says", short = 'a', default_value = "")]
    pub text_a: String,

    /// What the second agent said
    #[arg(long = "b-says", short = 'b', default_value = "")]
    pub text_b: String,

    /// Free-form description stored with the logged event
    #[arg(long, short, default_value = "")]
    pub context: String,
}

// Relationship command arguments
#[derive(Args, Debug)]
pub struct PairArgs {
    /// First agent id
    pub agent_a: String,

    /// Second agent id
    pub agent_b: String,
}

#[derive(Args, Debug)]
pub struct ShowRelationshipArgs {
    /// First agent id
    pub agent_a: String,

    /// Second agent id
    pub agent_b: String,

    /// Number of recent events to show
    #[arg(long, short, default_value_t = 5)]
    pub events: usize,
}

#[derive(Args, Debug)]
pub struct ListRelationshipsArgs {
    /// Only relationships involving this agent
    #[arg(long)]
    pub agent: Option<String>,

    /// Only relationships carrying this tag (acquaintance, friendship, rivalry, professional, mentorship)
    #[arg(long)]
    pub tag: Option<String>,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 50)]
    pub limit: usize,
}

// Mentorship command arguments
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON file holding an array of agent profiles
    #[arg(long, short)]
    pub profiles: PathBuf,

    /// Mentor agent id
    pub mentor: String,

    /// Mentee agent id
    pub mentee: String,
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// JSON file holding an array of agent profiles
    #[arg(long, short)]
    pub profiles: PathBuf,

    /// Mentee agent id; every other profile is a candidate mentor
    pub mentee: String,

    /// Number of mentors to return (defaults to the configured top-k)
    #[arg(short = 'k', long)]
    pub top: Option<usize>,

    /// Score candidates across worker threads
    #[arg(long)]
    pub concurrent: bool,
}

// Shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
