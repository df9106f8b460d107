use actix_web::web;

pub mod backend_health;
pub mod matches;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Reads are public; mutating routes carry AuthMiddleware individually
    cfg.service(
        web::scope("/matches")
            .service(matches::get_match)
            .service(matches::get_match_events)
            .service(matches::update_match_clock)
            .service(matches::post_match_goal)
            .service(matches::post_match_message)
            .service(matches::delete_match_event)
    );
}
