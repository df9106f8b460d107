//! The two external collaborators the live session consumes: the match command endpoint
//! and the push notification service, plus their concrete adapters.

pub mod http_commands;
pub mod redis_push;

use async_trait::async_trait;
use futures::stream::BoxStream;
use reqwest::StatusCode;
use thiserror::Error;

use crate::live::error::PushError;
use crate::models::{
    Match, MatchEvent, MatchSnapshot, PostGoalRequest, PostMessageRequest, PushChannel,
    PushMessage, UpdateClockRequest,
};

pub use http_commands::HttpCommandClient;
pub use redis_push::RedisPushSource;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("Endpoint rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Endpoint returned no payload")]
    MissingPayload,

    #[error("{0}")]
    Other(String),
}

/// Mutation and fetch surface of the external match-command service.
#[async_trait]
pub trait MatchCommandService: Send + Sync {
    async fn fetch_initial(&self, match_id: i64) -> Result<MatchSnapshot, TransportError>;

    async fn update_clock(
        &self,
        match_id: i64,
        request: &UpdateClockRequest,
    ) -> Result<Match, TransportError>;

    async fn post_goal(
        &self,
        match_id: i64,
        request: &PostGoalRequest,
    ) -> Result<Match, TransportError>;

    async fn post_message(
        &self,
        match_id: i64,
        request: &PostMessageRequest,
    ) -> Result<MatchEvent, TransportError>;

    async fn delete_event(&self, match_id: i64, event_id: i64) -> Result<(), TransportError>;

    async fn load_events_before(
        &self,
        match_id: i64,
        before_id: i64,
        limit: i64,
    ) -> Result<Vec<MatchEvent>, TransportError>;
}

/// Push notification service: one stream per (match, channel).
///
/// Dropping the stream closes the subscription.
#[async_trait]
pub trait PushSource: Send + Sync {
    async fn subscribe(
        &self,
        match_id: i64,
        channel: PushChannel,
    ) -> Result<BoxStream<'static, PushMessage>, PushError>;
}
