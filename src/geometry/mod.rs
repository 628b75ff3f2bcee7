//! View-dependent edge-geometry synthesis
//!
//! Fills in missing relation curves from entity positions. Which positions
//! are read depends on the view that produced them: the spatial view uses
//! the entities' raw model-space positions, the process view uses the layout
//! positions computed by the layering engine.

use crate::graph::Graph;
use crate::value_objects::Curve;

/// The view context relation curves are synthesized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewVariant {
    /// Raw geometric entity positions
    Spatial,
    /// Layering positions from the process view
    Process,
    /// Unknown view; synthesis is refused
    Unsupported,
}

/// Synthesize a straight-line curve for every relation lacking one
///
/// Relations that already carry a curve are left untouched, so repeated
/// calls are idempotent. In the process view a relation whose endpoint lacks
/// a layout position keeps its curve unset silently; in the spatial view a
/// missing raw position is reported. An unsupported view records an error
/// and updates nothing.
pub fn relation_curves(graph: &mut Graph, view: ViewVariant) {
    let view = match view {
        ViewVariant::Unsupported => {
            tracing::error!("unsupported view variant, relation curves not synthesized");
            return;
        }
        supported => supported,
    };

    let Graph {
        entities,
        relations,
    } = graph;

    for relation in relations.iter_mut() {
        if relation.curve.is_some() {
            continue;
        }

        let (Some(source), Some(target)) = (
            entities.get(&relation.source),
            entities.get(&relation.target),
        ) else {
            tracing::warn!(
                source = %relation.source,
                target = %relation.target,
                "relation endpoint missing from entity table, curve skipped"
            );
            continue;
        };

        match view {
            ViewVariant::Spatial => match (source.position, target.position) {
                (Some(start), Some(end)) => relation.curve = Some(Curve::between(start, end)),
                _ => {
                    tracing::warn!(
                        source = %relation.source,
                        target = %relation.target,
                        "endpoint has no geometric position, curve skipped"
                    );
                }
            },
            ViewVariant::Process => {
                // Endpoints the layering pass did not place keep no curve
                if let (Some(start), Some(end)) =
                    (source.layout_position(), target.layout_position())
                {
                    relation.curve = Some(Curve::between(start, end));
                }
            }
            ViewVariant::Unsupported => unreachable!("rejected above"),
        }
    }
}
