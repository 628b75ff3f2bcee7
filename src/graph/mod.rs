//! The shared graph model
//!
//! Entities, directed relations and the graph aggregate every engine in this
//! crate operates on. Relations may own a nested sub-graph, which models a
//! compound relationship; recursive operations (reversal, deduplication)
//! descend into it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::value_objects::{Curve, EntityId, Position3D};

/// Auxiliary data attachable to an entity
///
/// A closed set of typed components rather than an open type-keyed bag: the
/// engines in this crate only ever attach a computed layout position or a
/// cluster-membership tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fragment {
    /// Layout coordinates computed by the layering or cluster engine
    LayoutPosition(Position3D),
    /// Name of the cluster the entity belongs to
    Cluster(String),
}

impl Fragment {
    /// The kind an attachment replaces-or-adds by
    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::LayoutPosition(_) => FragmentKind::LayoutPosition,
            Fragment::Cluster(_) => FragmentKind::Cluster,
        }
    }
}

/// Discriminant of [`Fragment`], used for lookup and removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentKind {
    LayoutPosition,
    Cluster,
}

/// A uniquely identified node of the graph
///
/// The display name is not guaranteed unique; the raw `position` comes from
/// the surrounding model and is independent of any computed layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    /// Geometric position in model space, if the producer placed the entity
    pub position: Option<Position3D>,
    fragments: Vec<Fragment>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Entity {
    /// Create an entity with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            position: None,
            fragments: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Set the raw geometric position
    pub fn with_position(mut self, position: Position3D) -> Self {
        self.position = Some(position);
        self
    }

    /// Tag the entity with a cluster membership
    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.attach_fragment(Fragment::Cluster(cluster.into()), true);
        self
    }

    /// Attach a fragment, replacing-or-adding by kind
    ///
    /// If a fragment of the same kind is already present it is replaced only
    /// when `overwrite` is set; otherwise the call is a no-op.
    pub fn attach_fragment(&mut self, fragment: Fragment, overwrite: bool) {
        match self.fragments.iter_mut().find(|f| f.kind() == fragment.kind()) {
            Some(existing) => {
                if overwrite {
                    *existing = fragment;
                }
            }
            None => self.fragments.push(fragment),
        }
    }

    /// Look up the fragment of a given kind
    pub fn fragment(&self, kind: FragmentKind) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.kind() == kind)
    }

    /// Remove and return the fragment of a given kind
    pub fn remove_fragment(&mut self, kind: FragmentKind) -> Option<Fragment> {
        let index = self.fragments.iter().position(|f| f.kind() == kind)?;
        Some(self.fragments.remove(index))
    }

    /// Computed layout position, if a layout engine placed this entity
    pub fn layout_position(&self) -> Option<Position3D> {
        match self.fragment(FragmentKind::LayoutPosition) {
            Some(Fragment::LayoutPosition(position)) => Some(*position),
            _ => None,
        }
    }

    /// Cluster membership tag, if any
    pub fn cluster(&self) -> Option<&str> {
        match self.fragment(FragmentKind::Cluster) {
            Some(Fragment::Cluster(name)) => Some(name),
            _ => None,
        }
    }
}

/// A directed relation between two entities
///
/// `curve` stays unset until an edge-geometry pass fills it in. A relation
/// may own a complete nested [`Graph`], to arbitrary depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub source: EntityId,
    pub target: EntityId,
    pub curve: Option<Curve>,
    pub subgraph: Option<Box<Graph>>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Relation {
    /// Create a relation between two entity ids
    pub fn new(source: EntityId, target: EntityId) -> Self {
        Self {
            source,
            target,
            curve: None,
            subgraph: None,
            metadata: HashMap::new(),
        }
    }

    /// Attach a nested sub-graph
    pub fn with_subgraph(mut self, subgraph: Graph) -> Self {
        self.subgraph = Some(Box::new(subgraph));
        self
    }
}

/// Aggregate of entities and the ordered relations between them
///
/// Entities are keyed by id in insertion order, so every traversal in this
/// crate is deterministic. Relation endpoints are assumed to reference ids
/// present in the entity table; producers must not introduce dangling ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub entities: IndexMap<EntityId, Entity>,
    pub relations: Vec<Relation>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, returning its id
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.insert(id, entity);
        id
    }

    /// Append a relation
    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Get an entity by id
    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get a mutable entity by id
    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Whether an entity with the given id is present
    pub fn contains_entity(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_fragment_replace_or_add() {
        let mut entity = Entity::new("Pump");

        entity.attach_fragment(Fragment::Cluster("Hydraulics".to_string()), false);
        assert_eq!(entity.cluster(), Some("Hydraulics"));

        // Same kind without overwrite leaves the existing fragment alone
        entity.attach_fragment(Fragment::Cluster("Electrics".to_string()), false);
        assert_eq!(entity.cluster(), Some("Hydraulics"));

        entity.attach_fragment(Fragment::Cluster("Electrics".to_string()), true);
        assert_eq!(entity.cluster(), Some("Electrics"));

        // Different kinds coexist
        entity.attach_fragment(
            Fragment::LayoutPosition(Position3D::new(1.0, 2.0, 0.0)),
            true,
        );
        assert_eq!(entity.cluster(), Some("Electrics"));
        assert_eq!(
            entity.layout_position(),
            Some(Position3D::new(1.0, 2.0, 0.0))
        );
    }

    #[test]
    fn test_remove_fragment() {
        let mut entity = Entity::new("Valve").with_cluster("Piping");

        let removed = entity.remove_fragment(FragmentKind::Cluster);
        assert_eq!(removed, Some(Fragment::Cluster("Piping".to_string())));
        assert_eq!(entity.cluster(), None);
        assert_eq!(entity.remove_fragment(FragmentKind::Cluster), None);
    }

    #[test]
    fn test_graph_entity_table() {
        let mut graph = Graph::new();
        let a = graph.add_entity(Entity::new("A"));
        let b = graph.add_entity(Entity::new("B"));
        graph.add_relation(Relation::new(a, b));

        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.relation_count(), 1);
        assert!(graph.contains_entity(&a));
        assert_eq!(graph.entity(&b).unwrap().name, "B");

        // Insertion order is preserved
        let ids: Vec<_> = graph.entities.keys().copied().collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_nested_subgraph_ownership() {
        let mut inner = Graph::new();
        let x = inner.add_entity(Entity::new("X"));
        let y = inner.add_entity(Entity::new("Y"));
        inner.add_relation(Relation::new(x, y));

        let mut graph = Graph::new();
        let a = graph.add_entity(Entity::new("A"));
        let b = graph.add_entity(Entity::new("B"));
        graph.add_relation(Relation::new(a, b).with_subgraph(inner));

        let nested = graph.relations[0].subgraph.as_deref().unwrap();
        assert_eq!(nested.entity_count(), 2);
        assert_eq!(nested.relations[0].source, x);
    }
}
