use actix_web::{web, HttpResponse, Result};

use crate::middleware::auth::Claims;
use crate::models::{
    ApiResponse, EventPageQuery, PostGoalRequest, PostMessageRequest, UpdateClockRequest,
};
use crate::services::clock_transitions::TransitionError;
use crate::services::{LiveMatchError, LiveMatchService};

fn error_response(e: LiveMatchError) -> HttpResponse {
    let body = ApiResponse::<()>::failure(e.to_string());
    match e {
        LiveMatchError::MatchNotFound(_) | LiveMatchError::EventNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        LiveMatchError::Forbidden => HttpResponse::Forbidden().json(body),
        LiveMatchError::Validation(_)
        | LiveMatchError::Transition(TransitionError::InvalidHalfDuration(_)) => {
            HttpResponse::BadRequest().json(body)
        }
        LiveMatchError::Transition(_) | LiveMatchError::NotInPlay(_) => {
            HttpResponse::Conflict().json(body)
        }
        LiveMatchError::Database(db_error) => {
            tracing::error!("Database error in match handler: {}", db_error);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::failure("Internal server error"))
        }
    }
}

/// Fetch-initial: match row plus the live window of events.
pub async fn get_match_snapshot(
    match_id: i64,
    service: web::Data<LiveMatchService>,
) -> Result<HttpResponse> {
    match service.snapshot(match_id).await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::ok(snapshot))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_events_before(
    match_id: i64,
    query: web::Query<EventPageQuery>,
    service: web::Data<LiveMatchService>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    match service
        .events_before(match_id, query.before_id, query.limit)
        .await
    {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::ok(events))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_clock(
    match_id: i64,
    request: web::Json<UpdateClockRequest>,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = claims.actor();
    match service.update_clock(&actor, match_id, &request).await {
        Ok(live_match) => Ok(HttpResponse::Ok().json(ApiResponse::ok(live_match))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn post_goal(
    match_id: i64,
    request: web::Json<PostGoalRequest>,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = claims.actor();
    match service.post_goal(&actor, match_id, &request).await {
        Ok(live_match) => Ok(HttpResponse::Created().json(ApiResponse::ok(live_match))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn post_message(
    match_id: i64,
    request: web::Json<PostMessageRequest>,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = claims.actor();
    match service.post_message(&actor, match_id, &request).await {
        Ok(event) => Ok(HttpResponse::Created().json(ApiResponse::ok(event))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn delete_event(
    match_id: i64,
    event_id: i64,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let actor = claims.actor();
    match service.delete_event(&actor, match_id, event_id).await {
        Ok(event) => Ok(HttpResponse::Ok().json(ApiResponse::ok(event))),
        Err(e) => Ok(error_response(e)),
    }
}
