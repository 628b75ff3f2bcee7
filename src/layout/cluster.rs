//! Cluster-based spatial layout
//!
//! Partitions entities into named clusters via their cluster-membership
//! fragment and places each cluster's members around a caller-supplied
//! anchor point, using one of the interchangeable placement strategies.
//! Clusters are derived transiently on every call and never persisted on the
//! graph.

use indexmap::IndexMap;

use crate::graph::{Fragment, Graph};
use crate::value_objects::{EntityId, Position3D};

/// Placement strategy for clustered entities
///
/// `Unsupported` mirrors layout variants the engine does not know: applying
/// one is a silent no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutVariant {
    /// Members spread along an arc around the global origin
    Radial,
    /// Members stacked along the X axis from the anchor
    Stack,
    /// Members stacked along the Y axis from the anchor
    Columns,
    /// Unrecognized variant; placement is skipped
    Unsupported,
}

/// Errors raised by the cluster layout engine
#[derive(Debug, thiserror::Error)]
pub enum ClusterLayoutError {
    #[error("cluster layout requires {required} anchor points, {supplied} supplied")]
    InsufficientAnchors { required: usize, supplied: usize },
}

/// Cluster layout parameters
///
/// `sweep_angle` is the total angular span a radial cluster distributes its
/// members over; the spacings apply to the stack and column strategies.
#[derive(Debug, Clone)]
pub struct ClusterLayout {
    pub origin: Position3D,
    pub sweep_angle: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
}

impl Default for ClusterLayout {
    fn default() -> Self {
        Self {
            origin: Position3D::ORIGIN,
            sweep_angle: std::f64::consts::TAU,
            horizontal_spacing: 50.0,
            vertical_spacing: 50.0,
        }
    }
}

impl ClusterLayout {
    /// Place every clustered entity of the graph, in place
    ///
    /// Entities without a cluster fragment are excluded with a warning;
    /// clusters named in `ignore_clusters` are dropped before anchors are
    /// assigned. Each remaining cluster consumes one anchor point, in
    /// discovery order. Supplying fewer anchors than clusters aborts the
    /// call before any entity is moved — the one fatal path of this
    /// subsystem. Placed entities receive a `LayoutPosition` fragment,
    /// overwriting any previous one.
    pub fn apply(
        &self,
        variant: LayoutVariant,
        graph: &mut Graph,
        anchors: &[Position3D],
        ignore_clusters: &[String],
    ) -> Result<(), ClusterLayoutError> {
        let clusters = discover_clusters(graph, ignore_clusters);
        if anchors.len() < clusters.len() {
            return Err(ClusterLayoutError::InsufficientAnchors {
                required: clusters.len(),
                supplied: anchors.len(),
            });
        }

        for (index, members) in clusters.values().enumerate() {
            let anchor = anchors[index];
            match variant {
                LayoutVariant::Radial => self.place_radial(graph, members, anchor),
                LayoutVariant::Stack => {
                    place_along_axis(graph, members, anchor, Position3D::X_AXIS, self.horizontal_spacing)
                }
                LayoutVariant::Columns => {
                    place_along_axis(graph, members, anchor, Position3D::Y_AXIS, self.vertical_spacing)
                }
                // Inherited fallback: unknown variants place nothing
                LayoutVariant::Unsupported => {}
            }
        }

        Ok(())
    }

    /// Radial placement: the cluster keeps the anchor's distance from the
    /// origin and fans its members over `sweep_angle`, starting at the
    /// origin-to-anchor direction
    fn place_radial(&self, graph: &mut Graph, members: &[EntityId], anchor: Position3D) {
        let radius = self.origin.distance_to(&anchor);
        let start_angle = self.origin.planar_angle_to(&anchor);
        let step = self.sweep_angle / members.len() as f64;

        for (j, id) in members.iter().enumerate() {
            let angle = start_angle + step * j as f64;
            let position = Position3D::new(
                self.origin.x + radius * angle.cos(),
                self.origin.y + radius * angle.sin(),
                0.0,
            );
            attach_position(graph, *id, position);
        }
    }
}

/// Group entity ids by cluster fragment, in entity-table order
fn discover_clusters(graph: &Graph, ignore_clusters: &[String]) -> IndexMap<String, Vec<EntityId>> {
    let mut clusters: IndexMap<String, Vec<EntityId>> = IndexMap::new();
    for entity in graph.entities.values() {
        match entity.cluster() {
            Some(name) => clusters.entry(name.to_string()).or_default().push(entity.id),
            None => {
                tracing::warn!(id = %entity.id, name = %entity.name, "entity has no cluster fragment, excluded from cluster layout");
            }
        }
    }
    clusters.retain(|name, _| !ignore_clusters.iter().any(|ignored| ignored == name));
    clusters
}

fn place_along_axis(
    graph: &mut Graph,
    members: &[EntityId],
    anchor: Position3D,
    axis: Position3D,
    spacing: f64,
) {
    for (j, id) in members.iter().enumerate() {
        attach_position(graph, *id, anchor + axis * (j as f64 * spacing));
    }
}

fn attach_position(graph: &mut Graph, id: EntityId, position: Position3D) {
    if let Some(entity) = graph.entity_mut(&id) {
        entity.attach_fragment(Fragment::LayoutPosition(position), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Entity, Relation};

    fn position(graph: &Graph, id: &EntityId) -> Position3D {
        graph.entity(id).unwrap().layout_position().unwrap()
    }

    #[test]
    fn test_radial_placement() {
        let mut graph = Graph::new();
        let first = graph.add_entity(Entity::new("First").with_cluster("Plant"));
        let second = graph.add_entity(Entity::new("Second").with_cluster("Plant"));

        let layout = ClusterLayout {
            sweep_angle: std::f64::consts::PI,
            ..ClusterLayout::default()
        };
        let anchors = [Position3D::new(10.0, 0.0, 0.0)];
        layout
            .apply(LayoutVariant::Radial, &mut graph, &anchors, &[])
            .unwrap();

        // Radius 10, start angle 0, angular step pi/2
        let p0 = position(&graph, &first);
        assert!((p0.x - 10.0).abs() < 1e-9);
        assert!(p0.y.abs() < 1e-9);

        let p1 = position(&graph, &second);
        assert!(p1.x.abs() < 1e-9);
        assert!((p1.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_stack_and_column_placement() {
        let mut graph = Graph::new();
        let ids: Vec<_> = (0..3)
            .map(|i| graph.add_entity(Entity::new(format!("E{i}")).with_cluster("Deck")))
            .collect();

        let layout = ClusterLayout {
            horizontal_spacing: 5.0,
            vertical_spacing: 2.0,
            ..ClusterLayout::default()
        };
        let anchor = Position3D::new(1.0, 1.0, 0.0);

        layout
            .apply(LayoutVariant::Stack, &mut graph, &[anchor], &[])
            .unwrap();
        assert_eq!(position(&graph, &ids[2]), Position3D::new(11.0, 1.0, 0.0));

        layout
            .apply(LayoutVariant::Columns, &mut graph, &[anchor], &[])
            .unwrap();
        assert_eq!(position(&graph, &ids[2]), Position3D::new(1.0, 5.0, 0.0));
    }

    #[test]
    fn test_insufficient_anchors_aborts_without_placement() {
        let mut graph = Graph::new();
        let a = graph.add_entity(Entity::new("A").with_cluster("One"));
        graph.add_entity(Entity::new("B").with_cluster("Two"));

        let layout = ClusterLayout::default();
        let result = layout.apply(
            LayoutVariant::Stack,
            &mut graph,
            &[Position3D::ORIGIN],
            &[],
        );

        assert!(matches!(
            result,
            Err(ClusterLayoutError::InsufficientAnchors {
                required: 2,
                supplied: 1
            })
        ));
        assert_eq!(graph.entity(&a).unwrap().layout_position(), None);
    }

    #[test]
    fn test_ignored_clusters_are_dropped() {
        let mut graph = Graph::new();
        let kept = graph.add_entity(Entity::new("Kept").with_cluster("Structure"));
        let skipped = graph.add_entity(Entity::new("Skipped").with_cluster("Piping"));

        // One anchor suffices once "Piping" is ignored
        let layout = ClusterLayout::default();
        layout
            .apply(
                LayoutVariant::Stack,
                &mut graph,
                &[Position3D::ORIGIN],
                &["Piping".to_string()],
            )
            .unwrap();

        assert!(graph.entity(&kept).unwrap().layout_position().is_some());
        assert_eq!(graph.entity(&skipped).unwrap().layout_position(), None);
    }

    #[test]
    fn test_untagged_entities_are_excluded() {
        let mut graph = Graph::new();
        let tagged = graph.add_entity(Entity::new("Tagged").with_cluster("Deck"));
        let untagged = graph.add_entity(Entity::new("Untagged"));
        graph.add_relation(Relation::new(tagged, untagged));

        let layout = ClusterLayout::default();
        layout
            .apply(LayoutVariant::Stack, &mut graph, &[Position3D::ORIGIN], &[])
            .unwrap();

        assert!(graph.entity(&tagged).unwrap().layout_position().is_some());
        assert_eq!(graph.entity(&untagged).unwrap().layout_position(), None);
    }

    #[test]
    fn test_unsupported_variant_is_silent_noop() {
        let mut graph = Graph::new();
        let a = graph.add_entity(Entity::new("A").with_cluster("Deck"));

        let layout = ClusterLayout::default();
        layout
            .apply(
                LayoutVariant::Unsupported,
                &mut graph,
                &[Position3D::ORIGIN],
                &[],
            )
            .unwrap();

        assert_eq!(graph.entity(&a).unwrap().layout_position(), None);
    }
}
