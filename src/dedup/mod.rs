//! Cross-graph entity and relation deduplication
//!
//! Merging two independently produced graphs of the same model yields
//! duplicate entities; the caller decides which copy is canonical and hands
//! the mapping in, and [`unique_entities`] rewrites the graph against it.
//! [`unique_entity_names`] resolves display-name collisions afterwards.

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

use crate::graph::{Entity, Graph, Relation};
use crate::value_objects::EntityId;

/// Canonicalize a graph against a replacement map, in place
///
/// Every entity is replaced by its canonical counterpart from `replace_map`;
/// entities mapping to the same canonical object collapse into one. Relation
/// endpoints are rewritten to the canonical ids and nested sub-graphs are
/// canonicalized recursively. Relations that end up sharing a canonical
/// (source, target) pair are dropped except for the first occurrence —
/// relation payloads do not participate in the comparison.
///
/// Ids missing from the map keep their original entity and are reported with
/// a warning.
pub fn unique_entities(graph: &mut Graph, replace_map: &HashMap<EntityId, Entity>) {
    let mut canonical: IndexMap<EntityId, Entity> = IndexMap::with_capacity(graph.entities.len());
    for (id, entity) in graph.entities.drain(..) {
        match replace_map.get(&id) {
            Some(replacement) => {
                canonical
                    .entry(replacement.id)
                    .or_insert_with(|| replacement.clone());
            }
            None => {
                tracing::warn!(%id, name = %entity.name, "unique_entities: no canonical entry, keeping original");
                canonical.insert(id, entity);
            }
        }
    }
    graph.entities = canonical;

    for relation in &mut graph.relations {
        unique_relation(relation, replace_map);
    }

    let mut seen: HashSet<(EntityId, EntityId)> = HashSet::new();
    graph
        .relations
        .retain(|relation| seen.insert((relation.source, relation.target)));
}

/// Canonicalize a single relation: endpoints and nested sub-graph
pub fn unique_relation(relation: &mut Relation, replace_map: &HashMap<EntityId, Entity>) {
    if let Some(replacement) = replace_map.get(&relation.source) {
        relation.source = replacement.id;
    }
    if let Some(replacement) = replace_map.get(&relation.target) {
        relation.target = replacement.id;
    }
    if let Some(subgraph) = relation.subgraph.as_deref_mut() {
        unique_entities(subgraph, replace_map);
    }
}

/// Rename entities so that every display name occurs at most once
///
/// Entities are grouped by current name; every member of a group that shares
/// its name with at least one other entity is renamed to `"{name}_{index}"`,
/// the first member included. Uniquely named entities are left unchanged.
pub fn unique_entity_names<'a, I>(entities: I)
where
    I: IntoIterator<Item = &'a mut Entity>,
{
    let mut groups: IndexMap<String, Vec<&'a mut Entity>> = IndexMap::new();
    for entity in entities {
        groups.entry(entity.name.clone()).or_default().push(entity);
    }

    for (name, group) in groups {
        if group.len() < 2 {
            continue;
        }
        for (index, entity) in group.into_iter().enumerate() {
            entity.name = format!("{name}_{index}");
        }
    }
}
