pub mod actor;
pub mod commands;
pub mod live_match;
pub mod match_event;
pub mod push;

pub use actor::{Actor, ActorRole};
pub use commands::{
    ApiResponse, ClockAction, EventPageQuery, MatchSnapshot, PostGoalRequest,
    PostMessageRequest, UpdateClockRequest,
};
pub use live_match::{Match, MatchPatch, MatchStatus, DEFAULT_HALF_DURATION_MINUTES};
pub use match_event::{EventType, MatchEvent};
pub use push::{PushChannel, PushMessage};
