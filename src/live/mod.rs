//! Viewer-side live match core: clock and authority derivations, the event log, the
//! match snapshot holder, push synchronisation and the command surface.

pub mod authority;
pub mod clock;
pub mod error;
pub mod event_log;
pub mod session;
pub mod state;
pub mod store;
pub mod sync;

pub use authority::can_manage;
pub use clock::{format_clock, read_clock, ClockReading, Period};
pub use error::{CommandError, CommandResult, FetchError, PushError};
pub use event_log::{EventLog, EventUpdate, LIVE_WINDOW};
pub use session::{LiveMatchSession, LiveView, SessionOptions};
pub use state::MatchStateHolder;
pub use store::{LiveStore, SessionStatus};
pub use sync::{apply_push, RealtimeSyncClient};
