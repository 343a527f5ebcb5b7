use serde::{Deserialize, Serialize};

use crate::action::WorkerAction;
use crate::entity::{ComponentKind, Entity, EntityId};
use crate::error::DispatchError;
use crate::game::{Composed, Game};
use crate::patch::{Patch, WorkerPatch};
use crate::team::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerStatus {
	Idle,
	Assigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Worker {
	#[serde(default)]
	pub assigned_task_id: Option<EntityId>,
}

impl Worker {
	pub fn idle() -> Self {
		Self { assigned_task_id: None }
	}

	pub fn bound_to(task: EntityId) -> Self {
		Self { assigned_task_id: Some(task) }
	}

	pub fn is_idle(&self) -> bool {
		self.assigned_task_id.is_none()
	}

	pub fn status(&self) -> WorkerStatus {
		if self.is_idle() { WorkerStatus::Idle } else { WorkerStatus::Assigned }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerView {
	pub id: EntityId,
	pub worker: Worker,
	pub team: Team,
}

impl Composed for WorkerView {
	const COMPONENT: ComponentKind = ComponentKind::Worker;

	fn compose(entity: &Entity) -> Option<Self> {
		Some(Self { id: entity.id, worker: entity.worker?, team: entity.team? })
	}
}

pub(crate) fn dispatch(game: &mut Game, entity: &Entity, action: WorkerAction) -> Result<(), DispatchError> {
	let view = WorkerView::compose(entity).ok_or(DispatchError::UnresolvedAction {
		target: entity.id,
		action: action.name(),
	})?;
	match action {
		// Sole place a worker gets bound to a task.
		WorkerAction::AssignToTask { task } => game.send(view.id, WorkerAction::AssignTaskId { task_id: task }),
		WorkerAction::Release => game.send(view.id, WorkerAction::ClearTaskId),
		WorkerAction::AssignTaskId { task_id } => game.commit(view.id, assign_task_id(task_id), action.name()),
		WorkerAction::ClearTaskId => game.commit(view.id, clear_task_id(), action.name()),
	}
}

pub fn assign_task_id(task_id: EntityId) -> Patch {
	Patch::Worker(WorkerPatch { assigned_task_id: Some(Some(task_id)) })
}

pub fn clear_task_id() -> Patch {
	Patch::Worker(WorkerPatch { assigned_task_id: Some(None) })
}
