use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::action::Action;
use crate::entity::{ComponentKind, Entity, EntityId};
use crate::error::{DispatchError, SpawnError};
use crate::patch::Patch;
use crate::{task, worker};

/// A typed join over one component and everything it requires.
pub trait Composed: Sized {
    const COMPONENT: ComponentKind;

    fn compose(entity: &Entity) -> Option<Self>;
}

/// One resolved dispatch, in the order the cascade ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub target: EntityId,
    pub action: &'static str,
}

/// The entity store. `send` is the only way component state changes.
#[derive(Debug, Clone, Default)]
pub struct Game {
    entities: Vec<Arc<Entity>>,
    index: HashMap<EntityId, usize>,
    journal: Vec<Dispatched>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn spawn(&mut self, entity: Entity) -> Result<EntityId, SpawnError> {
        let id = entity.id;
        if self.index.contains_key(&id) {
            return Err(SpawnError::DuplicateId(id));
        }
        for kind in entity.components() {
            if let Some(missing) = kind.requires().iter().find(|r| !entity.has(**r)) {
                return Err(SpawnError::missing(id, kind, *missing));
            }
        }
        if let Some(t) = entity.task {
            if t.assigned_workers > t.required_workers {
                return Err(SpawnError::InvalidTask {
                    id,
                    assigned: t.assigned_workers,
                    required: t.required_workers,
                });
            }
        }
        self.index.insert(id, self.entities.len());
        self.entities.push(Arc::new(entity));
        debug!(%id, "spawned entity");
        Ok(id)
    }

    /// Removes an entity, keeping the registration order of the rest.
    /// Bindings are not touched; callers go through `Engine::complete_task`
    /// or `Engine::remove_worker`, which release first.
    pub(crate) fn despawn(&mut self, id: EntityId) -> Option<Arc<Entity>> {
        let idx = self.index.remove(&id)?;
        let removed = self.entities.remove(idx);
        for slot in self.index.values_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        debug!(%id, "despawned entity");
        Some(removed)
    }

    pub fn get(&self, id: EntityId) -> Option<&Arc<Entity>> {
        self.index.get(&id).map(|i| &self.entities[*i])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.index.contains_key(&id)
    }

    /// Every entity, in registration order. Handles stay valid after later sends.
    pub fn snapshot(&self) -> Vec<Arc<Entity>> {
        self.entities.clone()
    }

    pub fn ids_with(&self, kind: ComponentKind) -> Vec<EntityId> {
        self.entities.iter().filter(|e| e.has(kind)).map(|e| e.id).collect()
    }

    /// All entities carrying `V::COMPONENT` and its requirements, composed as `V`,
    /// in registration order.
    pub fn all_entities<V: Composed>(&self) -> Vec<V> {
        self.entities
            .iter()
            .filter(|e| e.satisfies(V::COMPONENT))
            .filter_map(|e| V::compose(e))
            .collect()
    }

    pub fn send(&mut self, target: EntityId, action: impl Into<Action>) -> Result<(), DispatchError> {
        let action = action.into();
        let name = action.name();
        let entity = self
            .get(target)
            .cloned()
            .ok_or(DispatchError::UnknownTarget { target, action: name })?;
        if !entity.satisfies(action.component()) {
            return Err(DispatchError::UnresolvedAction { target, action: name });
        }
        trace!(%target, action = name, "dispatch");
        self.journal.push(Dispatched { target, action: name });
        match action {
            Action::Task(a) => task::dispatch(self, &entity, a),
            Action::Worker(a) => worker::dispatch(self, &entity, a),
        }
    }

    /// Like `send`, then hands the settled store to `callback`.
    pub fn send_with<F>(&mut self, target: EntityId, action: impl Into<Action>, callback: F) -> Result<(), DispatchError>
    where
        F: FnOnce(&Game),
    {
        self.send(target, action)?;
        callback(self);
        Ok(())
    }

    pub(crate) fn commit(&mut self, target: EntityId, patch: Patch, action: &'static str) -> Result<(), DispatchError> {
        let idx = *self
            .index
            .get(&target)
            .ok_or(DispatchError::UnknownTarget { target, action })?;
        let next = patch
            .apply(&self.entities[idx])
            .ok_or(DispatchError::UnresolvedAction { target, action })?;
        debug!(%target, ?patch, "commit");
        self.entities[idx] = Arc::new(next);
        Ok(())
    }

    /// Dispatches since the last drain. `Engine::tick` drains it at the start
    /// of every tick, so it holds at most one tick's cascade.
    pub fn journal(&self) -> &[Dispatched] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<Dispatched> {
        std::mem::take(&mut self.journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{TaskAction, WorkerAction};
    use crate::task::{Task, TaskView};
    use crate::team::{Team, TeamId};
    use crate::worker::{Worker, WorkerView};

    fn worker(id: u32, team: u32) -> Entity {
        Entity::new(EntityId(id)).with_team(Team::new(TeamId(team))).with_worker(Worker::idle())
    }

    #[test]
    fn spawn_rejects_missing_requirement() {
        let mut g = Game::new();
        let err = g.spawn(Entity::new(EntityId(1)).with_task(Task::new(1))).unwrap_err();
        assert_eq!(
            err,
            SpawnError::MissingRequirement { id: EntityId(1), component: "task", requires: "team" }
        );
        assert!(g.is_empty());
    }

    #[test]
    fn spawn_rejects_duplicates_and_overstaffed_tasks() {
        let mut g = Game::new();
        g.spawn(worker(1, 1)).unwrap();
        assert_eq!(g.spawn(worker(1, 1)), Err(SpawnError::DuplicateId(EntityId(1))));
        let bad = Entity::new(EntityId(2))
            .with_team(Team::new(TeamId(1)))
            .with_task(Task { required_workers: 1, assigned_workers: 2 });
        assert!(matches!(g.spawn(bad), Err(SpawnError::InvalidTask { .. })));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn all_entities_in_registration_order() {
        let mut g = Game::new();
        for id in [5, 2, 9] {
            g.spawn(worker(id, 1)).unwrap();
        }
        g.spawn(Entity::new(EntityId(3)).with_team(Team::new(TeamId(1))).with_task(Task::new(1)))
            .unwrap();
        let ids: Vec<_> = g.all_entities::<WorkerView>().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![EntityId(5), EntityId(2), EntityId(9)]);
        let again: Vec<_> = g.all_entities::<WorkerView>().iter().map(|w| w.id).collect();
        assert_eq!(ids, again);
        assert_eq!(g.all_entities::<TaskView>().len(), 1);
    }

    #[test]
    fn all_entities_empty_when_nothing_matches() {
        let g = Game::new();
        assert!(g.all_entities::<WorkerView>().is_empty());
    }

    #[test]
    fn send_to_unknown_target_fails_without_mutation() {
        let mut g = Game::new();
        g.spawn(worker(1, 1)).unwrap();
        let before = g.snapshot();
        let err = g.send(EntityId(42), TaskAction::Update).unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownTarget { target: EntityId(42), action: "game:task.update" }
        );
        assert_eq!(g.snapshot(), before);
        assert!(g.journal().is_empty());
    }

    #[test]
    fn send_to_wrong_component_is_unresolved() {
        let mut g = Game::new();
        g.spawn(worker(1, 1)).unwrap();
        let err = g.send(EntityId(1), TaskAction::Update).unwrap_err();
        assert!(matches!(err, DispatchError::UnresolvedAction { target: EntityId(1), .. }));
    }

    #[test]
    fn commit_is_copy_on_write() {
        let mut g = Game::new();
        g.spawn(worker(1, 1)).unwrap();
        let old = g.get(EntityId(1)).cloned().unwrap();
        g.send(EntityId(1), WorkerAction::AssignTaskId { task_id: EntityId(7) }).unwrap();
        assert_eq!(old.worker.unwrap().assigned_task_id, None);
        assert_eq!(
            g.get(EntityId(1)).unwrap().worker.unwrap().assigned_task_id,
            Some(EntityId(7))
        );
    }

    #[test]
    fn send_with_runs_callback_after_commit() {
        let mut g = Game::new();
        g.spawn(worker(1, 1)).unwrap();
        let mut seen = None;
        g.send_with(EntityId(1), WorkerAction::AssignTaskId { task_id: EntityId(3) }, |g| {
            seen = g.get(EntityId(1)).and_then(|e| e.worker).and_then(|w| w.assigned_task_id);
        })
        .unwrap();
        assert_eq!(seen, Some(EntityId(3)));
    }

    #[test]
    fn despawn_keeps_order() {
        let mut g = Game::new();
        for id in 1..=4 {
            g.spawn(worker(id, 1)).unwrap();
        }
        assert!(g.despawn(EntityId(2)).is_some());
        assert!(g.despawn(EntityId(2)).is_none());
        assert_eq!(g.ids_with(ComponentKind::Worker), vec![EntityId(1), EntityId(3), EntityId(4)]);
        assert_eq!(g.get(EntityId(4)).unwrap().id, EntityId(4));
    }
}
