//! Layered "process view" layout
//!
//! Assigns 2D layout coordinates by topological depth: entities at the same
//! number of hops from the graph's sources share a column, deeper levels
//! come first. Level assignment uses the multi-source BFS of
//! [`crate::queries::depths_from_sources`], so multi-source graphs need no
//! placeholder root entity and the input graph is never mutated.

use crate::graph::{Fragment, FragmentKind, Graph};
use crate::queries;
use crate::value_objects::Position3D;

/// Compute the layered process view of a graph
///
/// Returns a clone with identical entity and relation counts in which every
/// entity reachable from a source carries a fresh `LayoutPosition` fragment:
/// `x` is the rank of the entity's depth level (0 for the deepest level,
/// increasing as levels get shallower) and `y` counts entities within the
/// level downwards from 0, in entity-table order. Pre-existing layout
/// positions are stripped first; entities on cycles unreachable from any
/// source receive no position.
pub fn process_view(graph: &Graph) -> Graph {
    let mut layered = graph.clone();
    for entity in layered.entities.values_mut() {
        entity.remove_fragment(FragmentKind::LayoutPosition);
    }

    let depths = queries::depths_from_sources(graph);

    // Distinct depth levels, deepest first
    let mut levels: Vec<usize> = depths.values().copied().collect();
    levels.sort_unstable_by(|a, b| b.cmp(a));
    levels.dedup();

    for (rank, level) in levels.into_iter().enumerate() {
        let x = rank as f64;
        let mut y = 0.0;
        for entity in layered.entities.values_mut() {
            if depths.get(&entity.id) == Some(&level) {
                entity.attach_fragment(
                    Fragment::LayoutPosition(Position3D::new(x, y, 0.0)),
                    true,
                );
                y -= 1.0;
            }
        }
    }

    layered
}
