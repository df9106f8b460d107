pub mod clock_transitions;
pub mod live_match_service;

pub use live_match_service::{LiveMatchError, LiveMatchService};
