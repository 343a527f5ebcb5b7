use serde::{Deserialize, Serialize};

use crate::entity::{ComponentKind, Entity, EntityId};
use crate::game::Composed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

/// Grouping key: workers are only ever assigned to tasks of their own team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
}

impl Team {
    pub fn new(id: TeamId) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamView {
    pub id: EntityId,
    pub team: Team,
}

impl Composed for TeamView {
    const COMPONENT: ComponentKind = ComponentKind::Team;

    fn compose(entity: &Entity) -> Option<Self> {
        Some(Self { id: entity.id, team: entity.team? })
    }
}
