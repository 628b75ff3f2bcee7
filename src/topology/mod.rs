//! Topology edits
//!
//! Entity removal with cascading edge cleanup, isolated-entity pruning and
//! relation reversal. Removal and reversal mutate the graph in place;
//! pruning returns a cleaned clone and leaves the input untouched.

use crate::graph::{Graph, Relation};
use crate::queries;
use crate::value_objects::EntityId;

/// Remove an entity and every relation that references it
///
/// Cascading the relation cleanup keeps the edge-node consistency invariant:
/// no relation may reference an id absent from the entity table. If the id
/// is not present the graph is left unchanged and a warning is recorded.
pub fn remove_entity(graph: &mut Graph, id: EntityId) {
    if graph.entities.shift_remove(&id).is_none() {
        tracing::warn!(%id, "remove_entity: entity not present, nothing removed");
        return;
    }
    graph
        .relations
        .retain(|relation| relation.source != id && relation.target != id);
}

/// Return a clone with every isolated entity removed
///
/// An entity is isolated when it appears as neither source nor target of any
/// relation. Entities participating in at least one relation are never
/// touched.
pub fn remove_isolated_entities(graph: &Graph) -> Graph {
    let mut pruned = graph.clone();
    for id in queries::isolated_entities(graph) {
        pruned.entities.shift_remove(&id);
    }
    pruned
}

/// Reverse every relation of the graph in place
///
/// Swaps source and target of each relation, preserving relation order, and
/// recurses into nested sub-graphs. Applying the operation twice restores
/// the original orientation at every nesting level.
pub fn reverse(graph: &mut Graph) {
    for relation in &mut graph.relations {
        reverse_relation(relation);
    }
}

/// Reverse a single relation and its nested sub-graph, if any
pub fn reverse_relation(relation: &mut Relation) {
    std::mem::swap(&mut relation.source, &mut relation.target);
    if let Some(subgraph) = relation.subgraph.as_deref_mut() {
        reverse(subgraph);
    }
}
