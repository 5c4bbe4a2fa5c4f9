//! Structural statistics for a tree: how many nodes of each shape, how full they are, and how
//! deep the tree goes.

use std::collections::HashMap;

use crate::node::{Node, NodeShape};

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NodeStats {
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
    pub density: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TreeStats {
    pub node_stats: HashMap<NodeShape, NodeStats>,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    /// Sum of every leaf's hit count.
    pub total_hits: u64,
    pub total_density: f64,
    pub max_height: usize,
}

pub(crate) fn get_tree_stats<V>(root: Option<&Node<V>>) -> TreeStats {
    let mut stats = TreeStats::default();
    let Some(root) = root else {
        return stats;
    };
    get_tree_stats_recurse(root, &mut stats, 1);

    let mut total_children = 0;
    let mut total_width = 0;
    for ns in stats.node_stats.values_mut() {
        total_children += ns.total_children;
        total_width += ns.width * ns.total_nodes;
        ns.density = ns.total_children as f64 / (ns.width * ns.total_nodes) as f64;
    }
    stats.num_inner_nodes = stats.node_stats.values().map(|ns| ns.total_nodes).sum();
    if total_width > 0 {
        stats.total_density = total_children as f64 / total_width as f64;
    }
    stats
}

fn get_tree_stats_recurse<V>(node: &Node<V>, tree_stats: &mut TreeStats, height: usize) {
    tree_stats.max_height = tree_stats.max_height.max(height);
    if let Some(hits) = node.hits() {
        tree_stats.num_leaves += 1;
        tree_stats.total_hits += hits;
        return;
    }

    tree_stats
        .node_stats
        .entry(node.shape())
        .and_modify(|e| {
            e.total_nodes += 1;
            e.total_children += node.num_children();
        })
        .or_insert(NodeStats {
            width: node.capacity(),
            total_nodes: 1,
            total_children: node.num_children(),
            density: 0.0,
        });
    for (_k, child) in node.children() {
        get_tree_stats_recurse(child, tree_stats, height + 1);
    }
}
