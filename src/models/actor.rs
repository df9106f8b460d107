use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    ClubManager,
    TeamManager,
    Fan,
    Unauthenticated,
}

/// The viewer acting on a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: Option<i64>,
    pub role: ActorRole,
    /// Only meaningful for `TeamManager`.
    #[serde(default)]
    pub team_id: Option<i64>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            id: None,
            role: ActorRole::Unauthenticated,
            team_id: None,
        }
    }

    pub fn new(id: i64, role: ActorRole, team_id: Option<i64>) -> Self {
        Self {
            id: Some(id),
            role,
            team_id,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role != ActorRole::Unauthenticated
    }
}

impl Default for Actor {
    fn default() -> Self {
        Self::anonymous()
    }
}
