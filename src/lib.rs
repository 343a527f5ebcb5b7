pub mod action;
pub mod engine;
pub mod entity;
pub mod error;
pub mod game;
pub mod hud;
pub mod level;
pub mod patch;
pub mod scenario;
pub mod task;
pub mod team;
pub mod worker;

// Re-exports for convenience in tests and integration users.
pub use action::{Action, TaskAction, WorkerAction};
pub use engine::Engine;
pub use entity::{ComponentKind, Entity, EntityId};
pub use error::{DispatchError, SpawnError};
pub use game::{Composed, Dispatched, Game};
pub use hud::{format_side_panel, format_status_line};
pub use level::{Goal, GoalKind, GoalStatus, Level, LevelError};
pub use patch::{Patch, TaskPatch, WorkerPatch};
pub use scenario::{ScenarioConfig, generate};
pub use task::{Task, TaskState, TaskView};
pub use team::{Team, TeamId, TeamView};
pub use worker::{Worker, WorkerStatus, WorkerView};
