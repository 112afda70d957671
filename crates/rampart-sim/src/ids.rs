//! Conversions between hecs entities and the stable ids exposed outside the sim.

use hecs::Entity;

use rampart_core::types::EntityId;

/// Public id of an entity.
pub fn id_of(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// Resolve an id back to an entity handle.
///
/// The handle carries its generation, so an id whose entity has been
/// despawned (and whose slot was reused) never resolves to the new occupant.
pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}
