use std::sync::Arc;

use tracing::{info, warn};

use crate::action::{TaskAction, WorkerAction};
use crate::entity::{ComponentKind, Entity, EntityId};
use crate::error::DispatchError;
use crate::game::Game;

/// The per-tick scheduler driving a `Game`.
#[derive(Debug, Default)]
pub struct Engine {
	pub game: Game,
	ticks: u64,
}

impl Engine {
	pub fn new(game: Game) -> Self {
		Self { game, ticks: 0 }
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	// Processes a single step:
	// - Drop the previous tick's journal; it only ever holds one tick's cascade
	// - Collect task ids up front so tasks spawned mid-tick wait for the next one
	// - Send `task.update` to each in registration order
	// - The first failed dispatch aborts the tick
	pub fn tick(&mut self) -> Result<(), DispatchError> {
		self.game.take_journal();
		let tasks = self.game.ids_with(ComponentKind::Task);
		for id in &tasks {
			if let Err(e) = self.game.send(*id, TaskAction::Update) {
				warn!(tick = self.ticks, error = %e, "tick aborted");
				return Err(e);
			}
		}
		self.ticks += 1;
		Ok(())
	}

	pub fn run(&mut self, ticks: u64) -> Result<(), DispatchError> {
		for _ in 0..ticks {
			self.tick()?;
		}
		info!(ticks = self.ticks, entities = self.game.len(), "run finished");
		Ok(())
	}

	/// Frees the task's workers, then removes the task entity.
	pub fn complete_task(&mut self, id: EntityId) -> Result<Arc<Entity>, DispatchError> {
		self.game.send(id, TaskAction::ReleaseWorkers)?;
		self.game
			.despawn(id)
			.ok_or(DispatchError::UnknownTarget { target: id, action: TaskAction::ReleaseWorkers.name() })
	}

	/// Gives a bound worker's slot back to its task, then removes the worker.
	pub fn remove_worker(&mut self, id: EntityId) -> Result<Arc<Entity>, DispatchError> {
		let action = WorkerAction::Release.name();
		let worker = self
			.game
			.get(id)
			.ok_or(DispatchError::UnknownTarget { target: id, action })?
			.worker
			.ok_or(DispatchError::UnresolvedAction { target: id, action })?;
		if let Some(task) = worker.assigned_task_id.filter(|t| self.game.contains(*t)) {
			self.game.send(task, TaskAction::DropWorker { worker: id })?;
		}
		self.game.despawn(id).ok_or(DispatchError::UnknownTarget { target: id, action })
	}
}
