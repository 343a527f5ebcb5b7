use std::fmt;

use crate::entity::{ComponentKind, EntityId};

/// A dispatchable message. The outer variant selects the component, the
/// inner one the reducer or effect, mirroring `game:<component>.<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Task(TaskAction),
    Worker(WorkerAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Per-tick effect: recruit idle workers of the same team.
    Update,
    /// Effect: unbind every worker assigned to this task and reset the count.
    ReleaseWorkers,
    /// Effect: unbind one worker of this task and give its slot back.
    DropWorker { worker: EntityId },
    /// Reducer.
    SetAssignedWorkers { assigned_workers: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerAction {
    AssignToTask { task: EntityId },
    Release,
    /// Reducer.
    AssignTaskId { task_id: EntityId },
    /// Reducer.
    ClearTaskId,
}

impl TaskAction {
    pub fn name(&self) -> &'static str {
        match self {
            TaskAction::Update => "game:task.update",
            TaskAction::ReleaseWorkers => "game:task.releaseWorkers",
            TaskAction::DropWorker { .. } => "game:task.dropWorker",
            TaskAction::SetAssignedWorkers { .. } => "game:task._setAssignedWorkers",
        }
    }
}

impl WorkerAction {
    pub fn name(&self) -> &'static str {
        match self {
            WorkerAction::AssignToTask { .. } => "game:worker.assignToTask",
            WorkerAction::Release => "game:worker.release",
            WorkerAction::AssignTaskId { .. } => "game:worker._assignTaskId",
            WorkerAction::ClearTaskId => "game:worker._clearTaskId",
        }
    }
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Task(a) => a.name(),
            Action::Worker(a) => a.name(),
        }
    }

    pub fn component(&self) -> ComponentKind {
        match self {
            Action::Task(_) => ComponentKind::Task,
            Action::Worker(_) => ComponentKind::Worker,
        }
    }

    /// Reducers carry the private `_` prefix in their names; effects don't.
    pub fn is_reducer(&self) -> bool {
        matches!(
            self,
            Action::Task(TaskAction::SetAssignedWorkers { .. })
                | Action::Worker(WorkerAction::AssignTaskId { .. } | WorkerAction::ClearTaskId)
        )
    }
}

impl From<TaskAction> for Action {
    fn from(a: TaskAction) -> Self {
        Action::Task(a)
    }
}

impl From<WorkerAction> for Action {
    fn from(a: WorkerAction) -> Self {
        Action::Worker(a)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_namespace() {
        assert_eq!(Action::Task(TaskAction::Update).to_string(), "game:task.update");
        assert_eq!(
            Action::from(WorkerAction::AssignToTask { task: EntityId(3) }).name(),
            "game:worker.assignToTask"
        );
        assert_eq!(Action::from(WorkerAction::Release).component(), ComponentKind::Worker);
    }

    #[test]
    fn reducers_are_underscored() {
        assert!(Action::from(TaskAction::SetAssignedWorkers { assigned_workers: 1 }).is_reducer());
        assert!(Action::from(WorkerAction::AssignTaskId { task_id: EntityId(1) }).is_reducer());
        assert!(Action::from(WorkerAction::ClearTaskId).is_reducer());
        assert!(!Action::from(TaskAction::Update).is_reducer());
        assert!(!Action::from(TaskAction::ReleaseWorkers).is_reducer());
        assert!(!Action::from(TaskAction::DropWorker { worker: EntityId(1) }).is_reducer());
    }

    #[test]
    fn reducer_variants_match_private_names() {
        let all: [Action; 8] = [
            TaskAction::Update.into(),
            TaskAction::ReleaseWorkers.into(),
            TaskAction::DropWorker { worker: EntityId(2) }.into(),
            TaskAction::SetAssignedWorkers { assigned_workers: 0 }.into(),
            WorkerAction::AssignToTask { task: EntityId(3) }.into(),
            WorkerAction::Release.into(),
            WorkerAction::AssignTaskId { task_id: EntityId(3) }.into(),
            WorkerAction::ClearTaskId.into(),
        ];
        for action in &all {
            assert_eq!(action.is_reducer(), action.name().contains("._"), "{action}");
        }
    }
}
