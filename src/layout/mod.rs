//! Layout engines
//!
//! Two ways of assigning layout coordinates to entities: the layered
//! "process view" ([`process::process_view`]) derives positions from
//! topological depth, and the cluster engine ([`cluster::ClusterLayout`])
//! arranges grouped entities radially, stacked or in columns. Both record
//! their result as a `LayoutPosition` fragment on each placed entity.

pub mod cluster;
pub mod process;

pub use cluster::{ClusterLayout, ClusterLayoutError, LayoutVariant};
pub use process::process_view;
