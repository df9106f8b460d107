use crate::models::{Actor, ActorRole, Match};

/// Whether `actor` may issue mutating commands against `live_match`.
///
/// Advisory only: it toggles affordances in the viewer. The command endpoint runs the
/// same check again before mutating anything.
pub fn can_manage(actor: &Actor, live_match: Option<&Match>) -> bool {
    let Some(live_match) = live_match else {
        return false;
    };

    match actor.role {
        ActorRole::Admin => true,
        // Granted without checking that the club owns either team.
        ActorRole::ClubManager => true,
        ActorRole::TeamManager => actor
            .team_id
            .is_some_and(|team_id| live_match.involves_team(team_id)),
        ActorRole::Fan | ActorRole::Unauthenticated => false,
    }
}
