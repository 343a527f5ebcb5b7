use crate::engine::Engine;
use crate::game::Game;
use crate::task::{TaskState, TaskView};
use crate::worker::{WorkerStatus, WorkerView};

pub fn format_status_line(engine: &Engine) -> String {
	let tasks = engine.game.all_entities::<TaskView>();
	let staffed = tasks.iter().filter(|t| t.task.is_staffed()).count();
	let idle = engine.game.all_entities::<WorkerView>().iter().filter(|w| w.worker.is_idle()).count();
	format!(
		"Tick: {} | Tasks staffed: {}/{} | Idle workers: {}",
		engine.ticks(),
		staffed,
		tasks.len(),
		idle
	)
}

pub fn format_side_panel(game: &Game) -> Vec<String> {
	let mut out = Vec::new();
	out.push("[Workers]".to_string());
	for w in game.all_entities::<WorkerView>() {
		let status = match w.worker.status() {
			WorkerStatus::Idle => "Idle",
			WorkerStatus::Assigned => "Assigned",
		};
		let task = w.worker.assigned_task_id.map(|t| format!("task {t}")).unwrap_or_else(|| "None".to_string());
		out.push(format!("Worker {} (team {}) – {} – {}", w.id, w.team.id.0, status, task));
	}
	out.push("[Tasks]".to_string());
	for t in game.all_entities::<TaskView>() {
		let state = match t.task.state() {
			TaskState::Understaffed => "Understaffed",
			TaskState::Staffed => "Staffed",
		};
		out.push(format!("Task {} (team {}) – {} – {}", t.id, t.team.id.0, t.task.description(), state));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::{Entity, EntityId};
	use crate::task::Task;
	use crate::team::{Team, TeamId};
	use crate::worker::Worker;

	fn engine() -> Engine {
		let mut g = Game::new();
		g.spawn(Entity::new(EntityId(1)).with_team(Team::new(TeamId(1))).with_worker(Worker::idle())).unwrap();
		g.spawn(Entity::new(EntityId(2)).with_team(Team::new(TeamId(1))).with_task(Task::new(1))).unwrap();
		Engine::new(g)
	}

	#[test]
	fn status_line_counts() {
		let mut e = engine();
		assert_eq!(format_status_line(&e), "Tick: 0 | Tasks staffed: 0/1 | Idle workers: 1");
		e.tick().unwrap();
		assert_eq!(format_status_line(&e), "Tick: 1 | Tasks staffed: 1/1 | Idle workers: 0");
	}

	#[test]
	fn side_panel_lists_workers_and_tasks() {
		let mut e = engine();
		e.tick().unwrap();
		let lines = format_side_panel(&e.game);
		assert_eq!(lines[0], "[Workers]");
		assert!(lines.iter().any(|l| l.contains("Worker #1") && l.contains("task #2")));
		assert!(lines.iter().any(|l| l.contains("Task #2") && l.contains("Staffed")));
	}
}
