//! Relationship-graph transformations for the engineering object model
//!
//! This crate is the graph layer of the object-model toolkit: it consumes a
//! property graph of domain entities and their directed relations (for
//! example a process or dependency diagram of a building model) and derives
//! layouts, edge geometry and normalized topology from it:
//!
//! - hierarchical layering ([`layout::process_view`])
//! - cluster-based spatial layout ([`layout::ClusterLayout`])
//! - view-dependent edge-geometry synthesis ([`geometry::relation_curves`])
//! - topology edits ([`topology`])
//! - cross-graph deduplication ([`dedup`])
//!
//! Geometry-kernel algorithms, rendering and persistence live elsewhere in
//! the toolkit; this crate only constructs straight-line curves and typed
//! layout fragments. All operations are synchronous and reentrant: no
//! state is shared between calls, so independent graphs can be processed
//! concurrently.

pub mod dedup;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod queries;
pub mod topology;
pub mod value_objects;

// Re-export the model
pub use graph::{Entity, Fragment, FragmentKind, Graph, Relation};
pub use value_objects::{Curve, EntityId, Position3D};

// Re-export the operations
pub use dedup::{unique_entities, unique_entity_names, unique_relation};
pub use geometry::{relation_curves, ViewVariant};
pub use layout::{process_view, ClusterLayout, ClusterLayoutError, LayoutVariant};
pub use topology::{remove_entity, remove_isolated_entities, reverse, reverse_relation};
