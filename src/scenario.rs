use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::entity::{Entity, EntityId};
use crate::error::SpawnError;
use crate::game::Game;
use crate::task::Task;
use crate::team::{Team, TeamId};
use crate::worker::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioConfig {
    pub teams: u32,
    pub workers_per_team: u32,
    pub tasks_per_team: u32,
    pub max_required_workers: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self { teams: 2, workers_per_team: 4, tasks_per_team: 3, max_required_workers: 3 }
    }
}

/// Builds a reproducible game: entities of all teams are shuffled into one
/// registration order, so team membership and order are both exercised.
pub fn generate(seed: u64, config: &ScenarioConfig) -> Result<Game, SpawnError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pending: Vec<Entity> = Vec::new();
    let mut next = 1u32;
    for t in 0..config.teams {
        let team = Team::new(TeamId(t + 1));
        for _ in 0..config.workers_per_team {
            pending.push(Entity::new(EntityId(next)).with_team(team).with_worker(Worker::idle()));
            next += 1;
        }
        for _ in 0..config.tasks_per_team {
            let required = rng.gen_range(1..=config.max_required_workers.max(1));
            pending.push(Entity::new(EntityId(next)).with_team(team).with_task(Task::new(required)));
            next += 1;
        }
    }

    let mut game = Game::new();
    while !pending.is_empty() {
        let i = rng.gen_range(0..pending.len());
        game.spawn(pending.swap_remove(i))?;
    }
    debug!(seed, entities = game.len(), "scenario generated");
    Ok(game)
}
