pub mod builders;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use builders::{bracket_with_final, group_of, parsed_stats, pending, player, series, team_ref};
#[allow(unused_imports)]
pub use mocks::ScriptedProvider;
#[allow(unused_imports)]
pub use setup::EngineSetup;
