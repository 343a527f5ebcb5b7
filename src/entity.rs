use std::fmt;

use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::team::Team;
use crate::worker::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Team,
    Worker,
    Task,
}

impl ComponentKind {
    /// Name used in the `game:<component>.<action>` namespace.
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Team => "team",
            ComponentKind::Worker => "worker",
            ComponentKind::Task => "task",
        }
    }

    /// Components that must sit on the same entity for this one's effects to run.
    pub fn requires(self) -> &'static [ComponentKind] {
        match self {
            ComponentKind::Team => &[],
            ComponentKind::Worker | ComponentKind::Task => &[ComponentKind::Team],
        }
    }
}

/// An entity record. Never mutated in place: the store swaps in a new record
/// for every committed patch, so older `Arc<Entity>` handles keep their values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker: Option<Worker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self { id, team: None, worker: None, task: None }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_worker(mut self, worker: Worker) -> Self {
        self.worker = Some(worker);
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Team => self.team.is_some(),
            ComponentKind::Worker => self.worker.is_some(),
            ComponentKind::Task => self.task.is_some(),
        }
    }

    pub fn components(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        [ComponentKind::Team, ComponentKind::Worker, ComponentKind::Task]
            .into_iter()
            .filter(|k| self.has(*k))
    }

    /// True when `kind` is present together with everything it requires.
    pub fn satisfies(&self, kind: ComponentKind) -> bool {
        self.has(kind) && kind.requires().iter().all(|r| self.has(*r))
    }
}
