//! Command handlers for the rapport CLI

pub mod interaction;
pub mod mentorship;
pub mod relationship;

pub use interaction::{handle_classify, handle_interact};
pub use mentorship::handle_match_command;
pub use relationship::handle_relationship_command;
