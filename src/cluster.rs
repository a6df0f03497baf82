//! Splitting the spanning tree into connected color clusters.
//!
//! Removing the k-1 heaviest edges of a minimum spanning tree is the classic
//! single-linkage clustering rule: the cut edges are the k-1 largest gaps
//! between groups of colors, so the remaining connected components group
//! colors that are close to each other.

use crate::{ClusterCount, mst::SpanningTree};

/// A partition of palette node ids into connected components of the cut tree.
///
/// Cluster ids are assigned by traversal start order: the component containing
/// the lowest unvisited node id is cluster 0, and so on. Every node id appears
/// in exactly one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clusters {
    /// The member node ids of each cluster, indexed by cluster id.
    members: Vec<Vec<u32>>,
}

impl Clusters {
    /// Split `tree` into `k` connected components by cutting its heaviest
    /// edges.
    ///
    /// The last `k - 1` entries of the weight-ascending edge list are marked
    /// as cut; a `k` greater than the node count is clamped, cutting every
    /// edge and yielding one singleton cluster per node. Components are then
    /// extracted by depth-first traversal over the non-cut edges, using an
    /// explicit stack so that cluster size is not limited by call depth.
    ///
    /// # Panics
    ///
    /// Panics if the traversal does not produce exactly `min(k, node count)`
    /// clusters, which would mean the edge list does not describe a spanning
    /// tree.
    #[must_use]
    pub fn from_tree(tree: &SpanningTree, k: ClusterCount) -> Self {
        let n = tree.node_count() as usize;
        let edges = tree.edges();
        let expected = k.as_usize().min(n);
        let kept = edges.len() - (expected - 1);

        // Both directions of every edge are recorded; the flag on each entry
        // marks whether the edge was cut and is therefore not traversable.
        let mut adjacency: Vec<Vec<(u32, bool)>> = vec![Vec::new(); n];
        for (index, edge) in edges.iter().enumerate() {
            let cut = index >= kept;
            adjacency[edge.node as usize].push((edge.parent, cut));
            adjacency[edge.parent as usize].push((edge.node, cut));
        }

        let mut visited = vec![false; n];
        let mut members = Vec::with_capacity(expected);
        let mut stack = Vec::new();
        #[allow(clippy::cast_possible_truncation)]
        for start in 0..n {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            stack.push(start as u32);
            let mut cluster = Vec::new();
            while let Some(node) = stack.pop() {
                cluster.push(node);
                for &(next, cut) in &adjacency[node as usize] {
                    if cut || visited[next as usize] {
                        continue;
                    }
                    visited[next as usize] = true;
                    stack.push(next);
                }
            }
            members.push(cluster);
        }

        assert_eq!(
            members.len(),
            expected,
            "cutting {} tree edges must split {n} nodes into exactly {expected} components",
            expected - 1,
        );
        Self { members }
    }

    /// Returns the number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether there are no clusters. Always `false` for clusters
    /// produced by [`from_tree`](Clusters::from_tree).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the member node ids of the cluster with the given id.
    #[inline]
    pub fn get(&self, cluster: usize) -> &[u32] {
        &self.members[cluster]
    }

    /// Returns an iterator over the clusters' member node ids, in cluster id
    /// order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &[u32]> {
        self.members.iter().map(Vec::as_slice)
    }
}
