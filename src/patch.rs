//! Partial state updates produced by reducers.
//!
//! A `None` field means "leave unchanged". Patches are merged into a fresh
//! copy of the entity record; the old record is never touched.

use crate::entity::{Entity, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch {
    Task(TaskPatch),
    Worker(WorkerPatch),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub assigned_workers: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerPatch {
    pub assigned_task_id: Option<Option<EntityId>>,
}

impl Patch {
    /// Returns the patched copy, or `None` if the entity lacks the component.
    pub fn apply(&self, entity: &Entity) -> Option<Entity> {
        let mut next = entity.clone();
        match self {
            Patch::Task(p) => {
                let task = next.task.as_mut()?;
                if let Some(n) = p.assigned_workers {
                    task.assigned_workers = n;
                }
            }
            Patch::Worker(p) => {
                let worker = next.worker.as_mut()?;
                if let Some(id) = p.assigned_task_id {
                    worker.assigned_task_id = id;
                }
            }
        }
        Some(next)
    }
}
