use thiserror::Error;

use crate::entity::{ComponentKind, EntityId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
	#[error("{action}: no entity {target}")]
	UnknownTarget { target: EntityId, action: &'static str },
	#[error("{action}: entity {target} has no matching component")]
	UnresolvedAction { target: EntityId, action: &'static str },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpawnError {
	#[error("Entity {0} already exists")]
	DuplicateId(EntityId),
	#[error("Entity {id}: component `{component}` requires `{requires}`")]
	MissingRequirement { id: EntityId, component: &'static str, requires: &'static str },
	#[error("Entity {id}: task has {assigned} assigned of {required} required workers")]
	InvalidTask { id: EntityId, assigned: u32, required: u32 },
}

impl SpawnError {
	pub(crate) fn missing(id: EntityId, component: ComponentKind, requires: ComponentKind) -> Self {
		SpawnError::MissingRequirement { id, component: component.name(), requires: requires.name() }
	}
}
