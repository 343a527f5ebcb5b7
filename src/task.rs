use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{TaskAction, WorkerAction};
use crate::entity::{ComponentKind, Entity, EntityId};
use crate::error::DispatchError;
use crate::game::{Composed, Game};
use crate::patch::{Patch, TaskPatch};
use crate::team::{Team, TeamId};
use crate::worker::WorkerView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Understaffed,
    Staffed,
}

/// Invariant: `assigned_workers <= required_workers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub required_workers: u32,
    #[serde(default)]
    pub assigned_workers: u32,
}

impl Task {
    pub fn new(required_workers: u32) -> Self {
        Self { required_workers, assigned_workers: 0 }
    }

    pub fn state(&self) -> TaskState {
        if self.assigned_workers >= self.required_workers {
            TaskState::Staffed
        } else {
            TaskState::Understaffed
        }
    }

    pub fn is_staffed(&self) -> bool {
        self.state() == TaskState::Staffed
    }

    pub fn open_slots(&self) -> u32 {
        self.required_workers.saturating_sub(self.assigned_workers)
    }

    pub fn description(&self) -> String {
        format!("{}/{} workers", self.assigned_workers, self.required_workers)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskView {
    pub id: EntityId,
    pub task: Task,
    pub team: Team,
}

impl Composed for TaskView {
    const COMPONENT: ComponentKind = ComponentKind::Task;

    fn compose(entity: &Entity) -> Option<Self> {
        Some(Self { id: entity.id, task: entity.task?, team: entity.team? })
    }
}

pub(crate) fn dispatch(game: &mut Game, entity: &Entity, action: TaskAction) -> Result<(), DispatchError> {
    let view = TaskView::compose(entity).ok_or(DispatchError::UnresolvedAction {
        target: entity.id,
        action: action.name(),
    })?;
    match action {
        TaskAction::Update => update(&view, game),
        TaskAction::ReleaseWorkers => release_workers(&view, game),
        TaskAction::DropWorker { worker } => drop_worker(&view, worker, game),
        TaskAction::SetAssignedWorkers { assigned_workers } => {
            let patch = set_assigned_workers(&view.task, assigned_workers);
            game.commit(view.id, patch, action.name())
        }
    }
}

/// Reducer. Exceeding `required_workers` is a logic error in the caller.
pub fn set_assigned_workers(task: &Task, assigned_workers: u32) -> Patch {
    assert!(
        assigned_workers <= task.required_workers,
        "assigned workers ({assigned_workers}) exceed required workers ({})",
        task.required_workers
    );
    Patch::Task(TaskPatch { assigned_workers: Some(assigned_workers) })
}

/// Idle workers of `team`, in registration order.
pub fn unassigned_workers(team: TeamId, game: &Game) -> Vec<WorkerView> {
    game.all_entities::<WorkerView>()
        .into_iter()
        .filter(|w| w.team.id == team && w.worker.is_idle())
        .collect()
}

fn update(view: &TaskView, game: &mut Game) -> Result<(), DispatchError> {
    if view.task.is_staffed() {
        return Ok(());
    }

    let assignable: Vec<WorkerView> = unassigned_workers(view.team.id, game)
        .into_iter()
        .take(view.task.open_slots() as usize)
        .collect();

    // The count is reserved before any worker is bound; there is no rollback.
    let assigned_workers = view.task.assigned_workers + assignable.len() as u32;
    game.send(view.id, TaskAction::SetAssignedWorkers { assigned_workers })?;

    for w in &assignable {
        game.send(w.id, WorkerAction::AssignToTask { task: view.id })?;
    }
    if !assignable.is_empty() {
        debug!(task = %view.id, recruited = assignable.len(), assigned_workers, "task recruited workers");
    }
    Ok(())
}

fn release_workers(view: &TaskView, game: &mut Game) -> Result<(), DispatchError> {
    let bound: Vec<EntityId> = game
        .all_entities::<WorkerView>()
        .into_iter()
        .filter(|w| w.team.id == view.team.id && w.worker.assigned_task_id == Some(view.id))
        .map(|w| w.id)
        .collect();
    for id in &bound {
        game.send(*id, WorkerAction::Release)?;
    }
    game.send(view.id, TaskAction::SetAssignedWorkers { assigned_workers: 0 })?;
    debug!(task = %view.id, released = bound.len(), "task released workers");
    Ok(())
}

fn drop_worker(view: &TaskView, worker: EntityId, game: &mut Game) -> Result<(), DispatchError> {
    let bound_here = game
        .get(worker)
        .and_then(|e| e.worker)
        .is_some_and(|w| w.assigned_task_id == Some(view.id));
    if !bound_here {
        return Ok(());
    }
    game.send(worker, WorkerAction::Release)?;
    let assigned_workers = view.task.assigned_workers.saturating_sub(1);
    game.send(view.id, TaskAction::SetAssignedWorkers { assigned_workers })?;
    debug!(task = %view.id, %worker, assigned_workers, "task dropped worker");
    Ok(())
}
