// src/routes/matches.rs
use actix_web::{delete, get, post, web, HttpResponse, Result};

use crate::handlers::match_handler;
use crate::middleware::auth::{AuthMiddleware, Claims};
use crate::models::{EventPageQuery, PostGoalRequest, PostMessageRequest, UpdateClockRequest};
use crate::services::LiveMatchService;

/// Current match row and the live window of events
#[get("/{match_id}")]
pub async fn get_match(
    path: web::Path<i64>,
    service: web::Data<LiveMatchService>,
) -> Result<HttpResponse> {
    match_handler::get_match_snapshot(path.into_inner(), service).await
}

/// Older events before a cursor id
#[get("/{match_id}/events")]
pub async fn get_match_events(
    path: web::Path<i64>,
    query: web::Query<EventPageQuery>,
    service: web::Data<LiveMatchService>,
) -> Result<HttpResponse> {
    match_handler::get_events_before(path.into_inner(), query, service).await
}

/// Drive the match clock
#[post("/{match_id}/clock", wrap = "AuthMiddleware")]
pub async fn update_match_clock(
    path: web::Path<i64>,
    request: web::Json<UpdateClockRequest>,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match_handler::update_clock(path.into_inner(), request, service, claims).await
}

#[post("/{match_id}/goals", wrap = "AuthMiddleware")]
pub async fn post_match_goal(
    path: web::Path<i64>,
    request: web::Json<PostGoalRequest>,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match_handler::post_goal(path.into_inner(), request, service, claims).await
}

#[post("/{match_id}/messages", wrap = "AuthMiddleware")]
pub async fn post_match_message(
    path: web::Path<i64>,
    request: web::Json<PostMessageRequest>,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match_handler::post_message(path.into_inner(), request, service, claims).await
}

/// Soft delete an event
#[delete("/{match_id}/events/{event_id}", wrap = "AuthMiddleware")]
pub async fn delete_match_event(
    path: web::Path<(i64, i64)>,
    service: web::Data<LiveMatchService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (match_id, event_id) = path.into_inner();
    match_handler::delete_event(match_id, event_id, service, claims).await
}
