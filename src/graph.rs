//! Module for analysing the transmission network between zones
use crate::dataset::Dataset;
use log::warn;
use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;

/// The network of zones, with an edge for every line
type ZoneGraph = UnGraph<usize, usize>;

/// Create an undirected graph with a node per zone and an edge per line
fn create_zone_graph(dataset: &Dataset) -> ZoneGraph {
    let mut graph = ZoneGraph::default();
    let nodes: Vec<_> = (0..dataset.num_zones())
        .map(|zone| graph.add_node(zone))
        .collect();
    for (idx, line) in dataset.lines.iter().enumerate() {
        graph.add_edge(nodes[line.from], nodes[line.to], idx);
    }

    graph
}

/// Count the number of islands (groups of zones connected by lines) in the network
pub fn count_islands(dataset: &Dataset) -> usize {
    connected_components(&create_zone_graph(dataset))
}

/// Warn the user if some zones cannot exchange power with the others.
///
/// This isn't an error, but each island must then balance its own demand.
pub fn check_zone_network(dataset: &Dataset) {
    let islands = count_islands(dataset);
    if islands > 1 {
        warn!(
            "The transmission network is split into {islands} islands; zones in different \
            islands cannot exchange power"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{single_zone_dataset, two_zone_dataset};
    use rstest::rstest;

    #[rstest]
    fn test_count_islands_connected(two_zone_dataset: Dataset) {
        assert_eq!(count_islands(&two_zone_dataset), 1);
    }

    #[rstest]
    fn test_count_islands_no_lines(mut two_zone_dataset: Dataset) {
        two_zone_dataset.lines.clear();
        assert_eq!(count_islands(&two_zone_dataset), 2);
    }

    #[test]
    fn test_count_islands_single_zone() {
        assert_eq!(count_islands(&single_zone_dataset(&[1.0], &[])), 1);
    }
}
