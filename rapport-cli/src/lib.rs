pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::RapportCliContext;
pub use output::{
    CliColors, format_error, format_info, format_success, format_warning, output_error,
    print_compatibility, print_descriptor, print_ranking, print_relationship,
    print_relationship_list,
};
pub use utils::{find_profile, load_profiles, parse_relationship_type};
