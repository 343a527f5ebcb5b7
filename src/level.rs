use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::engine::Engine;
use crate::entity::{Entity, EntityId};
use crate::error::SpawnError;
use crate::game::Game;
use crate::task::TaskView;

#[derive(Debug, Error)]
pub enum LevelError {
	#[error("Cannot read level file: {0}")]
	Io(#[from] std::io::Error),
	#[error("Invalid level JSON: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("Cannot place entity: {0}")]
	Spawn(#[from] SpawnError),
}

/// Initial placement and goal conditions for one puzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
	pub label: String,
	pub entities: Vec<Entity>,
	#[serde(default)]
	pub goals: Vec<Goal>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
	#[serde(flatten)]
	pub kind: GoalKind,
	#[serde(default)]
	pub desc: String,
	#[serde(default)]
	pub is_mandatory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalKind {
	TaskStaffed { task: EntityId },
	AllTasksStaffed,
	WorkerAssigned { worker: EntityId, task: EntityId },
	MaxTicks { ticks: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalStatus {
	pub desc: String,
	pub is_mandatory: bool,
	pub met: bool,
}

impl GoalKind {
	pub fn is_met(&self, engine: &Engine) -> bool {
		let game = &engine.game;
		match self {
			GoalKind::TaskStaffed { task } => game
				.get(*task)
				.and_then(|e| e.task)
				.is_some_and(|t| t.is_staffed()),
			GoalKind::AllTasksStaffed => game.all_entities::<TaskView>().iter().all(|t| t.task.is_staffed()),
			GoalKind::WorkerAssigned { worker, task } => game
				.get(*worker)
				.and_then(|e| e.worker)
				.is_some_and(|w| w.assigned_task_id == Some(*task)),
			GoalKind::MaxTicks { ticks } => engine.ticks() <= *ticks,
		}
	}
}

impl Level {
	pub fn from_json(s: &str) -> Result<Self, LevelError> {
		Ok(serde_json::from_str(s)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
		let raw = std::fs::read_to_string(path)?;
		Self::from_json(&raw)
	}

	/// Spawns every entity in file order.
	pub fn build_game(&self) -> Result<Game, LevelError> {
		let mut game = Game::new();
		for e in &self.entities {
			game.spawn(e.clone())?;
		}
		info!(level = %self.label, entities = game.len(), "level loaded");
		Ok(game)
	}

	pub fn build_engine(&self) -> Result<Engine, LevelError> {
		Ok(Engine::new(self.build_game()?))
	}

	pub fn evaluate(&self, engine: &Engine) -> Vec<GoalStatus> {
		self.goals
			.iter()
			.map(|g| GoalStatus { desc: g.desc.clone(), is_mandatory: g.is_mandatory, met: g.kind.is_met(engine) })
			.collect()
	}

	pub fn is_solved(&self, engine: &Engine) -> bool {
		self.evaluate(engine).iter().filter(|s| s.is_mandatory).all(|s| s.met)
	}
}
