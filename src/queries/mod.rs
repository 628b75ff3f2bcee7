//! Structural queries over a graph
//!
//! Pure read-only queries the editors and layout engines are built on:
//! source entities, isolated entities, and depth-from-root levels. All of
//! them work on a petgraph projection of the entity/relation tables and
//! iterate entities in table order, so results are deterministic.

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};

use crate::graph::Graph;
use crate::value_objects::EntityId;

/// Directed adjacency projection of a graph
///
/// Parallel relations collapse into one edge, which is fine for every query
/// here: degree tests and hop counts do not depend on multiplicity.
fn projection(graph: &Graph) -> DiGraphMap<EntityId, ()> {
    let mut digraph = DiGraphMap::new();
    for id in graph.entities.keys() {
        digraph.add_node(*id);
    }
    for relation in &graph.relations {
        digraph.add_edge(relation.source, relation.target, ());
    }
    digraph
}

/// Entities with no incoming relation, in entity-table order
pub fn sources(graph: &Graph) -> Vec<EntityId> {
    let digraph = projection(graph);
    graph
        .entities
        .keys()
        .copied()
        .filter(|id| {
            digraph
                .neighbors_directed(*id, Direction::Incoming)
                .next()
                .is_none()
        })
        .collect()
}

/// Entities that appear as neither source nor target of any relation
pub fn isolated_entities(graph: &Graph) -> Vec<EntityId> {
    let digraph = projection(graph);
    graph
        .entities
        .keys()
        .copied()
        .filter(|id| {
            digraph
                .neighbors_directed(*id, Direction::Incoming)
                .next()
                .is_none()
                && digraph
                    .neighbors_directed(*id, Direction::Outgoing)
                    .next()
                    .is_none()
        })
        .collect()
}

/// Depth of every reachable entity, measured in relation hops from a virtual
/// root connected to all sources
///
/// The virtual root sits at depth 0, so every source entity has depth 1.
/// Depth is the shortest hop count (multi-source BFS). Entities unreachable
/// from any source — members of a cycle with no external predecessor — carry
/// no depth and are absent from the result.
pub fn depths_from_sources(graph: &Graph) -> HashMap<EntityId, usize> {
    let digraph = projection(graph);

    let mut depths: HashMap<EntityId, usize> = HashMap::new();
    let mut queue: VecDeque<EntityId> = VecDeque::new();

    for id in graph.entities.keys().copied() {
        if digraph
            .neighbors_directed(id, Direction::Incoming)
            .next()
            .is_none()
        {
            depths.insert(id, 1);
            queue.push_back(id);
        }
    }

    while let Some(current) = queue.pop_front() {
        let depth = depths[&current];
        for next in digraph.neighbors_directed(current, Direction::Outgoing) {
            if !depths.contains_key(&next) {
                depths.insert(next, depth + 1);
                queue.push_back(next);
            }
        }
    }

    depths
}
